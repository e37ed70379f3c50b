//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-visible text goes through this module so quiet mode and the
//! stdout/stderr split are applied consistently.

pub mod output;
