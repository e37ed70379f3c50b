//! core::types
//!
//! Closed domain types shared by every pipeline stage.
//!
//! # Types
//!
//! - [`OperationKind`] - The fixed set of user-invokable operations
//! - [`Slot`] - A positional argument an operation accepts
//! - [`ConfigField`] - A key of the persisted configuration record
//!
//! # Examples
//!
//! ```
//! use gerrit_cli::core::types::{ConfigField, OperationKind};
//!
//! assert_eq!(OperationKind::Commit.name(), "commit");
//! assert_eq!(OperationKind::Commit.min_args(), 1);
//! assert_eq!(OperationKind::Init.usage(), "[<user>] [<repo>]");
//! assert_eq!(ConfigField::User.key(), "user");
//! ```

use std::fmt;

/// A user-invokable operation.
///
/// The set is closed: the registry maps every accepted token onto exactly
/// one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Clone a repository and wire it up for Gerrit.
    Init,
    /// Commit staged changes with a message.
    Commit,
    /// Push the current HEAD for review.
    Review,
    /// Persist the default user.
    SetUser,
    /// Persist the default repository.
    SetRepo,
    /// Print the version string.
    ShowVersion,
    /// Print usage for every operation.
    ShowHelp,
}

impl OperationKind {
    /// Every operation, in help order.
    pub const ALL: [OperationKind; 7] = [
        OperationKind::Init,
        OperationKind::Commit,
        OperationKind::Review,
        OperationKind::SetUser,
        OperationKind::SetRepo,
        OperationKind::ShowHelp,
        OperationKind::ShowVersion,
    ];

    /// Canonical command token for this operation.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Init => "init",
            OperationKind::Commit => "commit",
            OperationKind::Review => "review",
            OperationKind::SetUser => "config.user",
            OperationKind::SetRepo => "config.repo",
            OperationKind::ShowVersion => "-v",
            OperationKind::ShowHelp => "-help",
        }
    }

    /// Positional argument slots, in order.
    ///
    /// Arguments past the last slot are ignored.
    pub fn slots(self) -> &'static [Slot] {
        const INIT: &[Slot] = &[Slot::optional("user"), Slot::optional("repo")];
        const MESSAGE: &[Slot] = &[Slot::required("message")];
        const BRANCH: &[Slot] = &[Slot::optional("branch")];
        const USER: &[Slot] = &[Slot::required("user name")];
        const REPO: &[Slot] = &[Slot::required("repo")];

        match self {
            OperationKind::Init => INIT,
            OperationKind::Commit => MESSAGE,
            OperationKind::Review => BRANCH,
            OperationKind::SetUser => USER,
            OperationKind::SetRepo => REPO,
            OperationKind::ShowVersion | OperationKind::ShowHelp => &[],
        }
    }

    /// Number of arguments that must be supplied on the command line.
    ///
    /// Optional slots may still fail resolution when no configured
    /// fallback exists.
    pub fn min_args(self) -> usize {
        self.slots().iter().filter(|slot| slot.required).count()
    }

    /// Argument contract rendered for usage text, e.g. `[<user>] [<repo>]`.
    pub fn usage(self) -> String {
        self.slots()
            .iter()
            .map(Slot::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One-line description used in help output.
    pub fn summary(self) -> &'static str {
        match self {
            OperationKind::Init => {
                "clone the repo for the user and install the Gerrit commit-msg hook. \
                 Variants of use: 1) init <user> <repo>. 2) init <repo>. 3) init. \
                 Missing parameters are taken from the config"
            }
            OperationKind::Commit => "git commit -m \"<message>\"",
            OperationKind::Review => {
                "git push gerrit HEAD:refs/for/<branch> (default branch: master)"
            }
            OperationKind::SetUser => "save default user to config",
            OperationKind::SetRepo => "save default repo to config",
            OperationKind::ShowVersion => "version",
            OperationKind::ShowHelp => "help",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A positional argument accepted by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Placeholder name shown in usage text.
    pub name: &'static str,
    /// Whether the argument must be supplied on the command line.
    pub required: bool,
}

impl Slot {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.required {
            write!(f, "<{}>", self.name)
        } else {
            write!(f, "[<{}>]", self.name)
        }
    }
}

/// A key of the persisted configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    User,
    Repo,
}

impl ConfigField {
    /// Key name as written to the config file.
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::User => "user",
            ConfigField::Repo => "repo",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
