//! Gerrit - short aliases for Gerrit clone, commit and review workflows
//!
//! A single-binary tool that turns a handful of short commands into the
//! git invocations a Gerrit workflow needs, with persisted defaults for the
//! user and repository.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses flags, renders output)
//! - [`engine`] - Classify -> Resolve -> Plan -> Execute pipeline
//! - [`core`] - Operation kinds, command registry, configuration store
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Every accepted command token maps to exactly one operation
//! 2. Plans are built without I/O and are deterministic
//! 3. External commands are structured argument vectors, never shell strings
//! 4. The config file is only ever replaced whole, by rename

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
