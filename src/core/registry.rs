//! core::registry
//!
//! Static table mapping command tokens (including aliases) to operations.
//!
//! # Invariants
//!
//! - Every token in [`COMMAND_TABLE`] is unique
//! - Lookups are exact, case-sensitive matches
//! - Every [`OperationKind`] has at least one token
//!
//! Usage text is rendered from this table so that help output cannot drift
//! from what the registry accepts.
//!
//! # Example
//!
//! ```
//! use gerrit_cli::core::registry;
//! use gerrit_cli::core::types::OperationKind;
//!
//! assert_eq!(registry::resolve("c").unwrap(), OperationKind::Commit);
//! assert!(registry::resolve("COMMIT").is_err());
//! ```

use thiserror::Error;

use super::types::OperationKind;

/// Every accepted token and the operation it selects.
///
/// The first token listed for a kind is its canonical name; the rest are
/// aliases.
pub const COMMAND_TABLE: &[(&str, OperationKind)] = &[
    ("init", OperationKind::Init),
    ("commit", OperationKind::Commit),
    ("c", OperationKind::Commit),
    ("review", OperationKind::Review),
    ("r", OperationKind::Review),
    ("config.user", OperationKind::SetUser),
    ("c.user", OperationKind::SetUser),
    ("config.repo", OperationKind::SetRepo),
    ("c.repo", OperationKind::SetRepo),
    ("-v", OperationKind::ShowVersion),
    ("-help", OperationKind::ShowHelp),
    ("-h", OperationKind::ShowHelp),
];

/// Errors from command classification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The command token is missing or not registered.
    #[error("{}", unknown_command_message(.token, .available))]
    UnknownCommand {
        /// The rejected token, or `None` when no command was given.
        token: Option<String>,
        /// All registered tokens joined by `", "`.
        available: String,
    },
}

fn unknown_command_message(token: &Option<String>, available: &str) -> String {
    match token {
        Some(token) => format!("invalid command '{}' (available: {})", token, available),
        None => format!("missing command (available: {})", available),
    }
}

/// Classify a command token.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownCommand`] listing every registered token
/// when `token` is not in the table.
pub fn resolve(token: &str) -> Result<OperationKind, RegistryError> {
    COMMAND_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == token)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| RegistryError::UnknownCommand {
            token: Some(token.to_string()),
            available: available_tokens(),
        })
}

/// Classify the first token of a command line, if any.
pub fn resolve_first(tokens: &[String]) -> Result<OperationKind, RegistryError> {
    match tokens.first() {
        Some(token) => resolve(token),
        None => Err(RegistryError::UnknownCommand {
            token: None,
            available: available_tokens(),
        }),
    }
}

/// All registered tokens joined by `", "`.
pub fn available_tokens() -> String {
    COMMAND_TABLE
        .iter()
        .map(|(token, _)| *token)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tokens that select `kind`, canonical name first.
pub fn tokens_for(kind: OperationKind) -> Vec<&'static str> {
    COMMAND_TABLE
        .iter()
        .filter(|(_, candidate)| *candidate == kind)
        .map(|(token, _)| *token)
        .collect()
}

/// Render usage text for every operation.
///
/// Each line lists the canonical token, its aliases, the argument contract
/// and a short description.
pub fn usage_text() -> String {
    let mut lines = vec!["Gerrit. Available commands:".to_string()];

    for kind in OperationKind::ALL {
        let tokens = tokens_for(kind);
        let Some((name, aliases)) = tokens.split_first() else {
            continue;
        };

        let mut line = format!("    - {}", name);
        if !aliases.is_empty() {
            line.push_str(&format!("(alias: {})", aliases.join(", ")));
        }
        let usage = kind.usage();
        if !usage.is_empty() {
            line.push(' ');
            line.push_str(&usage);
        }
        line.push_str(": ");
        line.push_str(kind.summary());
        lines.push(line);
    }

    lines.join("\n")
}
