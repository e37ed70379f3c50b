//! ui::output
//!
//! User-facing output.
//!
//! # Design
//!
//! Regular output goes to stdout and respects the quiet flag. Warnings and
//! errors go to stderr. Diagnostic logging is separate and goes through
//! `tracing`.

use std::fmt::Display;

/// How much the tool says, derived from `--quiet` and `--debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors and requested output only
    Quiet,
    /// Step echo, confirmations and warnings
    Normal,
    /// Normal output plus debug logs
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Default `tracing` filter directive for this level.
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Debug => "debug",
        }
    }
}

/// Print progress or confirmation to stdout, unless quiet.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print requested output (always shown).
///
/// Used for output the user explicitly asked for, such as help text.
pub fn emit(message: impl Display) {
    println!("{}", message);
}

/// Report a fatal problem on stderr. Never suppressed.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Report a non-fatal problem on stderr, unless quiet.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}
