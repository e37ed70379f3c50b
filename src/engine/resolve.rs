//! engine::resolve
//!
//! Argument validation and config fallback.
//!
//! # Rules
//!
//! Given the arguments after the command token:
//!
//! | Operation | 0 args | 1 arg | 2+ args |
//! |---|---|---|---|
//! | init | user and repo from config | repo = arg1, user from config | user = arg1, repo = arg2 |
//! | commit | error | message = arg1 | message = arg1 |
//! | review | branch = `master` | branch = arg1 | branch = arg1 |
//! | config.user / config.repo | error | value = arg1 | value = arg1 |
//! | -v / -help | - | - | - |
//!
//! Arguments beyond an operation's slots are ignored. Commit messages and
//! review branches have every `'` and `"` removed.
//!
//! # Example
//!
//! ```
//! use gerrit_cli::core::config::Config;
//! use gerrit_cli::core::types::OperationKind;
//! use gerrit_cli::engine::resolve::{resolve, ResolvedParameters};
//!
//! let args = vec![r#"say "hi""#.to_string()];
//! let params = resolve(OperationKind::Commit, &args, &Config::default()).unwrap();
//! assert_eq!(params, ResolvedParameters::Commit { message: "say hi".to_string() });
//! ```

use thiserror::Error;

use crate::core::config::ConfigLookup;
use crate::core::types::{ConfigField, OperationKind};

/// Branch reviewed when none is given.
pub const DEFAULT_REVIEW_BRANCH: &str = "master";

/// Errors from argument resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Too few arguments, after config fallback, for the operation.
    #[error("invalid number of args for '{operation}' (min: {minimum})")]
    ArgCount {
        operation: OperationKind,
        minimum: usize,
    },
}

/// Fully determined inputs for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedParameters {
    Init { user: String, repo: String },
    Commit { message: String },
    Review { branch: String },
    SetConfig { field: ConfigField, value: String },
    ShowVersion,
    ShowHelp,
}

/// Validate `args` for `kind` and fill missing values from `config`.
///
/// `args` excludes the command token itself.
///
/// # Errors
///
/// Returns [`ResolveError::ArgCount`] when required values are neither
/// supplied nor configured.
pub fn resolve(
    kind: OperationKind,
    args: &[String],
    config: &dyn ConfigLookup,
) -> Result<ResolvedParameters, ResolveError> {
    let params = match kind {
        OperationKind::Init => resolve_init(args, config)?,
        OperationKind::Commit => ResolvedParameters::Commit {
            message: strip_quotes(required_first(kind, args)?),
        },
        OperationKind::Review => ResolvedParameters::Review {
            branch: strip_quotes(
                args.first()
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_REVIEW_BRANCH),
            ),
        },
        OperationKind::SetUser => ResolvedParameters::SetConfig {
            field: ConfigField::User,
            value: required_first(kind, args)?.to_string(),
        },
        OperationKind::SetRepo => ResolvedParameters::SetConfig {
            field: ConfigField::Repo,
            value: required_first(kind, args)?.to_string(),
        },
        OperationKind::ShowVersion => ResolvedParameters::ShowVersion,
        OperationKind::ShowHelp => ResolvedParameters::ShowHelp,
    };

    if args.len() > kind.slots().len() {
        tracing::debug!(
            operation = %kind,
            ignored = args.len() - kind.slots().len(),
            "ignoring extra arguments"
        );
    }

    Ok(params)
}

fn required_first(kind: OperationKind, args: &[String]) -> Result<&str, ResolveError> {
    match args.first() {
        Some(first) if args.len() >= kind.min_args() => Ok(first),
        _ => Err(ResolveError::ArgCount {
            operation: kind,
            minimum: kind.min_args(),
        }),
    }
}

fn resolve_init(
    args: &[String],
    config: &dyn ConfigLookup,
) -> Result<ResolvedParameters, ResolveError> {
    let (user, repo) = match args {
        [] => {
            let user = config.lookup(ConfigField::User);
            let repo = config.lookup(ConfigField::Repo);
            match (user, repo) {
                (Some(user), Some(repo)) => (user.to_string(), repo.to_string()),
                (None, _) => return Err(init_arg_count(2)),
                (Some(_), None) => return Err(init_arg_count(1)),
            }
        }
        [repo] => {
            let user = config
                .lookup(ConfigField::User)
                .ok_or_else(|| init_arg_count(2))?;
            (user.to_string(), repo.clone())
        }
        [user, repo, ..] => (user.clone(), repo.clone()),
    };

    Ok(ResolvedParameters::Init { user, repo })
}

fn init_arg_count(minimum: usize) -> ResolveError {
    ResolveError::ArgCount {
        operation: OperationKind::Init,
        minimum,
    }
}

/// Remove every single and double quote character.
///
/// Characters are dropped, not escaped.
pub fn strip_quotes(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '"' | '\'')).collect()
}
