//! core
//!
//! Core domain types, the command registry, and the configuration store.
//!
//! # Modules
//!
//! - [`types`] - Operation kinds, argument slots, config fields
//! - [`registry`] - Static token table and usage text
//! - [`config`] - Persistent configuration store
//! - [`paths`] - Centralized path routing for the config file
//!
//! # Design Principles
//!
//! - The set of operations is closed and known at build time
//! - The config file is the only durable state
//! - Nothing here spawns processes

pub mod config;
pub mod paths;
pub mod registry;
pub mod types;
