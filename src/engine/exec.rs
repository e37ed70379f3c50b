//! engine::exec
//!
//! The step executor.
//!
//! # Executor Contract
//!
//! The executor:
//! 1. Echoes each step to stdout before running it
//! 2. Runs steps strictly in order, one at a time
//! 3. Tracks a working directory that `ChangeDir` steps update
//! 4. Never stops early: a failed step is reported as a warning and the
//!    next step still runs
//!
//! Exit statuses of external commands are recorded in the
//! [`ExecutionReport`] but do not change the outcome of the invocation.
//!
//! # Collaborators
//!
//! Process spawning goes through the [`CommandRunner`] trait.
//! [`ProcessRunner`] spawns real processes with inherited stdio; tests
//! substitute a recording runner.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::plan::{CommandSpec, PlanStep};
use crate::ui::output::{self, Verbosity};

/// Outcome of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub status: Option<i32>,
    /// Captured output, if the runner captures it.
    pub captured: Option<String>,
}

impl RunOutput {
    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external commands.
pub trait CommandRunner {
    /// Run `command` with `cwd` as its working directory.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command could not be started.
    fn run(&mut self, command: &CommandSpec, cwd: &Path) -> io::Result<RunOutput>;
}

/// Spawns real processes, sharing this process's stdin/stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &CommandSpec, cwd: &Path) -> io::Result<RunOutput> {
        let status = std::process::Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .status()?;

        Ok(RunOutput {
            status: status.code(),
            captured: None,
        })
    }
}

/// Why a step did not succeed.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("failed to start '{command}': {source}")]
    Spawn { command: String, source: io::Error },

    #[error("'{command}' exited with status {code}")]
    ExitStatus { command: String, code: i32 },

    #[error("'{command}' was terminated by a signal")]
    Terminated { command: String },

    #[error("failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to mark '{path}' executable: {source}")]
    Permissions { path: PathBuf, source: io::Error },
}

/// What happened to one step.
#[derive(Debug)]
pub struct StepReport {
    /// The step as planned.
    pub step: PlanStep,
    /// Working directory the step ran in.
    pub cwd: PathBuf,
    /// `Ok` if the step succeeded.
    pub outcome: Result<(), StepError>,
}

/// What happened to a whole plan.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    /// One entry per step, in execution order.
    pub steps: Vec<StepReport>,
}

impl ExecutionReport {
    /// Whether every step succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.outcome.is_ok())
    }

    /// Errors from failed steps, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &StepError> {
        self.steps.iter().filter_map(|s| s.outcome.as_ref().err())
    }
}

/// Executes plan steps in order.
pub struct Executor<'a> {
    runner: &'a mut dyn CommandRunner,
    cwd: PathBuf,
    verbosity: Verbosity,
}

impl<'a> Executor<'a> {
    /// Create an executor starting in `cwd`.
    pub fn new(runner: &'a mut dyn CommandRunner, cwd: PathBuf, verbosity: Verbosity) -> Self {
        Self {
            runner,
            cwd,
            verbosity,
        }
    }

    /// Current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Run every step, in order, regardless of earlier failures.
    pub fn execute(&mut self, steps: &[PlanStep]) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for step in steps {
            output::print(step, self.verbosity);

            let cwd = self.cwd.clone();
            let outcome = self.apply(step);

            match &outcome {
                Ok(()) => tracing::debug!(%step, cwd = %cwd.display(), "step succeeded"),
                Err(err) => {
                    tracing::debug!(%step, cwd = %cwd.display(), error = %err, "step failed");
                    output::warn(err, self.verbosity);
                }
            }

            report.steps.push(StepReport {
                step: step.clone(),
                cwd,
                outcome,
            });
        }

        report
    }

    fn apply(&mut self, step: &PlanStep) -> Result<(), StepError> {
        match step {
            PlanStep::Run(command) => self.run(command),
            PlanStep::ChangeDir { path } => {
                // Not validated: a failed clone surfaces as spawn errors later.
                self.cwd = self.cwd.join(path);
                Ok(())
            }
            PlanStep::CreateDir { path } => {
                let target = self.cwd.join(path);
                fs::create_dir_all(&target).map_err(|source| StepError::CreateDir {
                    path: target,
                    source,
                })
            }
            PlanStep::InstallHook { fetch, path } => {
                let fetched = self.run(fetch);
                let target = self.cwd.join(path);
                let marked = make_executable(&target)
                    .map_err(|source| StepError::Permissions { path: target, source });
                fetched.and(marked)
            }
        }
    }

    fn run(&mut self, command: &CommandSpec) -> Result<(), StepError> {
        let output = self
            .runner
            .run(command, &self.cwd)
            .map_err(|source| StepError::Spawn {
                command: command.to_string(),
                source,
            })?;

        match output.status {
            Some(0) => Ok(()),
            Some(code) => Err(StepError::ExitStatus {
                command: command.to_string(),
                code,
            }),
            None => Err(StepError::Terminated {
                command: command.to_string(),
            }),
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(path: &Path) -> io::Result<()> {
    fs::metadata(path).map(|_| ())
}
