//! engine::plan
//!
//! Deterministic plan generation.
//!
//! # Architecture
//!
//! A plan is the only thing handed from resolution to execution. Building
//! one is pure: no I/O, no config access, no process spawning.
//!
//! Commands are structured (program plus argument vector) and are never
//! passed through a shell, so user-supplied values cannot break quoting.
//! [`CommandSpec`]'s `Display` renders a shell-quoted line for echo and
//! preview only.
//!
//! # Init Sequence
//!
//! Always five steps, in this order:
//! 1. `git clone https://<user>@<host>/a/<repo> <dir>`
//! 2. change into `<dir>`
//! 3. create `.git/hooks`
//! 4. fetch the `commit-msg` hook and mark it executable
//! 5. `git remote add gerrit https://<user>@<host>/a/<repo>`
//!
//! # Example
//!
//! ```
//! use gerrit_cli::engine::plan::{build, Plan};
//! use gerrit_cli::engine::resolve::ResolvedParameters;
//!
//! let plan = build(&ResolvedParameters::Review { branch: "dev".to_string() });
//! let Plan::Steps(steps) = plan else { unreachable!() };
//! assert_eq!(steps.len(), 1);
//! assert!(steps[0].to_string().starts_with("git push gerrit "));
//! ```

use std::fmt;
use std::path::PathBuf;

use super::resolve::ResolvedParameters;
use crate::core::registry;
use crate::core::types::ConfigField;

/// Gerrit host every URL points at.
pub const GERRIT_HOST: &str = "gerrit.delivery.epam.com";

/// Name of the remote registered by `init` and pushed to by `review`.
pub const GERRIT_REMOTE: &str = "gerrit";

/// Hooks directory, relative to the checkout.
pub const HOOKS_DIR: &str = ".git/hooks";

/// Commit-message hook path, relative to the checkout.
pub const COMMIT_MSG_HOOK: &str = ".git/hooks/commit-msg";

/// An external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to run, looked up on `PATH`.
    pub program: String,
    /// Arguments, passed verbatim.
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// A `git` invocation.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        f.write_str(&shell_words::join(words))
    }
}

/// A single executor step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Run an external command in the current working directory.
    Run(CommandSpec),

    /// Change the working directory for every later step.
    ChangeDir {
        /// Directory, relative to the current working directory.
        path: PathBuf,
    },

    /// Create a directory and any missing parents.
    CreateDir {
        /// Directory, relative to the current working directory.
        path: PathBuf,
    },

    /// Download a git hook and mark it executable.
    InstallHook {
        /// Command that writes the hook to `path`.
        fetch: CommandSpec,
        /// Hook file, relative to the current working directory.
        path: PathBuf,
    },
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStep::Run(command) => write!(f, "{}", command),
            PlanStep::ChangeDir { path } => {
                write!(f, "cd {}", shell_words::quote(&path.to_string_lossy()))
            }
            PlanStep::CreateDir { path } => {
                write!(f, "mkdir -p {}", shell_words::quote(&path.to_string_lossy()))
            }
            PlanStep::InstallHook { fetch, path } => write!(
                f,
                "{}; chmod +x {}",
                fetch,
                shell_words::quote(&path.to_string_lossy())
            ),
        }
    }
}

/// What an operation does once its parameters are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Hand these steps to the executor, in order.
    Steps(Vec<PlanStep>),

    /// Write one config field.
    Persist { field: ConfigField, value: String },

    /// Print this text.
    Print(String),
}

impl Plan {
    /// Human-readable lines describing the plan.
    pub fn preview(&self) -> Vec<String> {
        match self {
            Plan::Steps(steps) => steps.iter().map(ToString::to_string).collect(),
            Plan::Persist { field, value } => vec![format!("set {} = {}", field, value)],
            Plan::Print(text) => text.lines().map(str::to_string).collect(),
        }
    }
}

/// Build the plan for resolved parameters.
pub fn build(params: &ResolvedParameters) -> Plan {
    match params {
        ResolvedParameters::Init { user, repo } => Plan::Steps(init_steps(user, repo)),
        ResolvedParameters::Commit { message } => {
            Plan::Steps(vec![PlanStep::Run(CommandSpec::git([
                "commit",
                "-m",
                message.as_str(),
            ]))])
        }
        ResolvedParameters::Review { branch } => Plan::Steps(vec![PlanStep::Run(
            CommandSpec::git([
                "push".to_string(),
                GERRIT_REMOTE.to_string(),
                format!("HEAD:refs/for/{}", branch),
            ]),
        )]),
        ResolvedParameters::SetConfig { field, value } => Plan::Persist {
            field: *field,
            value: value.clone(),
        },
        ResolvedParameters::ShowVersion => Plan::Print(version_text()),
        ResolvedParameters::ShowHelp => Plan::Print(registry::usage_text()),
    }
}

fn init_steps(user: &str, repo: &str) -> Vec<PlanStep> {
    let url = clone_url(user, repo);
    let dir = checkout_dir(repo);

    vec![
        PlanStep::Run(CommandSpec::git(["clone", url.as_str(), dir])),
        PlanStep::ChangeDir {
            path: PathBuf::from(dir),
        },
        PlanStep::CreateDir {
            path: PathBuf::from(HOOKS_DIR),
        },
        PlanStep::InstallHook {
            fetch: CommandSpec::new(
                "curl",
                ["-Lo".to_string(), COMMIT_MSG_HOOK.to_string(), hook_url(user)],
            ),
            path: PathBuf::from(COMMIT_MSG_HOOK),
        },
        PlanStep::Run(CommandSpec::git([
            "remote",
            "add",
            GERRIT_REMOTE,
            url.as_str(),
        ])),
    ]
}

/// Authenticated clone URL for `repo`.
pub fn clone_url(user: &str, repo: &str) -> String {
    format!("https://{}@{}/a/{}", user, GERRIT_HOST, repo)
}

/// Authenticated URL of the commit-message hook script.
pub fn hook_url(user: &str) -> String {
    format!("https://{}@{}/tools/hooks/commit-msg", user, GERRIT_HOST)
}

/// Directory `git clone` checks `repo` out into.
///
/// This is the last path segment without a trailing `.git`.
pub fn checkout_dir(repo: &str) -> &str {
    let trimmed = repo.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    match last.strip_suffix(".git") {
        Some(stem) if !stem.is_empty() => stem,
        _ => last,
    }
}

/// Version line printed by `-v`.
pub fn version_text() -> String {
    format!("Gerrit version: v{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod init {
        use super::*;

        fn steps(user: &str, repo: &str) -> Vec<PlanStep> {
            match build(&ResolvedParameters::Init {
                user: user.to_string(),
                repo: repo.to_string(),
            }) {
                Plan::Steps(steps) => steps,
                other => panic!("expected steps, got {:?}", other),
            }
        }

        #[test]
        fn five_steps_in_order() {
            let steps = steps("jdoe", "tools");
            assert_eq!(steps.len(), 5);

            assert_eq!(
                steps[0],
                PlanStep::Run(CommandSpec::git([
                    "clone",
                    "https://jdoe@gerrit.delivery.epam.com/a/tools",
                    "tools",
                ]))
            );
            assert_eq!(
                steps[1],
                PlanStep::ChangeDir {
                    path: PathBuf::from("tools")
                }
            );
            assert_eq!(
                steps[2],
                PlanStep::CreateDir {
                    path: PathBuf::from(".git/hooks")
                }
            );
            assert_eq!(
                steps[3],
                PlanStep::InstallHook {
                    fetch: CommandSpec::new(
                        "curl",
                        [
                            "-Lo",
                            ".git/hooks/commit-msg",
                            "https://jdoe@gerrit.delivery.epam.com/tools/hooks/commit-msg",
                        ]
                    ),
                    path: PathBuf::from(".git/hooks/commit-msg"),
                }
            );
            assert_eq!(
                steps[4],
                PlanStep::Run(CommandSpec::git([
                    "remote",
                    "add",
                    "gerrit",
                    "https://jdoe@gerrit.delivery.epam.com/a/tools",
                ]))
            );
        }

        #[test]
        fn nested_repo_clones_into_last_segment() {
            let steps = steps("jdoe", "platform/tools");
            assert_eq!(
                steps[1],
                PlanStep::ChangeDir {
                    path: PathBuf::from("tools")
                }
            );
            assert_eq!(
                steps[0],
                PlanStep::Run(CommandSpec::git([
                    "clone",
                    "https://jdoe@gerrit.delivery.epam.com/a/platform/tools",
                    "tools",
                ]))
            );
        }

        #[test]
        fn preview_lines() {
            let plan = build(&ResolvedParameters::Init {
                user: "jdoe".to_string(),
                repo: "tools".to_string(),
            });
            let lines = plan.preview();
            assert_eq!(lines.len(), 5);
            assert!(lines[0].starts_with("git clone "));
            assert!(lines[0].ends_with(" tools"));
            assert_eq!(lines[1], "cd tools");
            assert_eq!(lines[2], "mkdir -p .git/hooks");
            assert!(lines[3].starts_with("curl -Lo .git/hooks/commit-msg "));
            assert!(lines[3].ends_with("; chmod +x .git/hooks/commit-msg"));
            assert!(lines[4].starts_with("git remote add gerrit "));
        }
    }

    #[test]
    fn commit_passes_message_as_one_arg() {
        let plan = build(&ResolvedParameters::Commit {
            message: "he said hi".to_string(),
        });
        assert_eq!(
            plan,
            Plan::Steps(vec![PlanStep::Run(CommandSpec::git([
                "commit",
                "-m",
                "he said hi"
            ]))])
        );
        let line = &plan.preview()[0];
        assert!(line.starts_with("git commit -m "));
        assert!(line.contains("he said hi"));
    }

    #[test]
    fn review_targets_refs_for_branch() {
        let plan = build(&ResolvedParameters::Review {
            branch: "feature/x".to_string(),
        });
        assert_eq!(
            plan,
            Plan::Steps(vec![PlanStep::Run(CommandSpec::git([
                "push",
                "gerrit",
                "HEAD:refs/for/feature/x"
            ]))])
        );
    }

    #[test]
    fn set_config_persists() {
        let plan = build(&ResolvedParameters::SetConfig {
            field: ConfigField::User,
            value: "jdoe".to_string(),
        });
        assert_eq!(
            plan,
            Plan::Persist {
                field: ConfigField::User,
                value: "jdoe".to_string()
            }
        );
        assert_eq!(plan.preview(), vec!["set user = jdoe"]);
    }

    #[test]
    fn version_and_help_print() {
        assert_eq!(
            build(&ResolvedParameters::ShowVersion),
            Plan::Print(format!("Gerrit version: v{}", env!("CARGO_PKG_VERSION")))
        );
        assert_eq!(
            build(&ResolvedParameters::ShowHelp),
            Plan::Print(registry::usage_text())
        );
    }

    #[test]
    fn checkout_dir_variants() {
        assert_eq!(checkout_dir("tools"), "tools");
        assert_eq!(checkout_dir("platform/tools"), "tools");
        assert_eq!(checkout_dir("platform/tools/"), "tools");
        assert_eq!(checkout_dir("tools.git"), "tools");
        assert_eq!(checkout_dir(".git"), ".git");
    }
}
