//! engine
//!
//! Orchestrates one invocation: Classify -> Resolve -> Plan -> Execute.
//!
//! # Architecture
//!
//! 1. **Classify**: map the command token to an [`OperationKind`] via the
//!    registry
//! 2. **Resolve**: validate argument counts and fill defaults from the
//!    config store
//! 3. **Plan**: build a deterministic plan (pure)
//! 4. **Execute**: print, persist, or hand steps to the [`Executor`]
//!
//! Stages run strictly in sequence. The first error aborts the pipeline and
//! is returned to the caller; nothing is retried.
//!
//! # Example
//!
//! ```no_run
//! use gerrit_cli::core::config::ConfigStore;
//! use gerrit_cli::core::paths::ConfigPaths;
//! use gerrit_cli::engine::{self, Context, ProcessRunner};
//!
//! let mut store = ConfigStore::load(ConfigPaths::resolve()).unwrap();
//! let tokens = vec!["review".to_string(), "dev".to_string()];
//! let outcome = engine::run(&tokens, &mut store, &mut ProcessRunner, &Context::default());
//! ```
//!
//! [`OperationKind`]: crate::core::types::OperationKind

pub mod exec;
pub mod plan;
pub mod resolve;

pub use exec::{CommandRunner, ExecutionReport, Executor, ProcessRunner, RunOutput, StepError};
pub use plan::{build, CommandSpec, Plan, PlanStep};
pub use resolve::{resolve, ResolveError, ResolvedParameters};

use std::path::PathBuf;

use crate::core::config::{ConfigError, ConfigStore};
use crate::core::registry::{self, RegistryError};
use crate::core::types::ConfigField;
use crate::ui::output::Verbosity;

/// Execution context for one invocation.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Directory emitted commands start in (defaults to the process cwd).
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Print the plan instead of running or persisting it.
    pub dry_run: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    fn working_dir(&self) -> Result<PathBuf, EngineError> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().map_err(EngineError::WorkingDir),
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The command token is missing or unknown.
    #[error(transparent)]
    Classify(#[from] RegistryError),

    /// Too few arguments for the operation.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The config store could not be read or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The working directory for emitted commands is unavailable.
    #[error("failed to determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

/// Result of a successful invocation.
#[derive(Debug)]
pub enum Outcome {
    /// Informational text to show the user.
    Printed(String),

    /// A config field was written.
    Persisted {
        field: ConfigField,
        value: String,
        path: PathBuf,
    },

    /// Steps were handed to the executor.
    Executed(ExecutionReport),

    /// Dry run: what would have been executed or persisted.
    Previewed(Vec<String>),
}

/// Run one command line through the full pipeline.
///
/// `tokens` are the raw arguments after the program name; the first one is
/// the command token.
///
/// # Errors
///
/// Returns the first stage failure. Failed external commands are not errors;
/// they are recorded in the [`ExecutionReport`].
pub fn run(
    tokens: &[String],
    store: &mut ConfigStore,
    runner: &mut dyn CommandRunner,
    ctx: &Context,
) -> Result<Outcome, EngineError> {
    // 1. Classify
    let kind = registry::resolve_first(tokens)?;
    let args = tokens.get(1..).unwrap_or_default();
    tracing::debug!(operation = %kind, args = args.len(), "classified command");

    // 2. Resolve
    let params = resolve::resolve(kind, args, &*store)?;
    tracing::debug!(?params, "resolved parameters");

    // 3. Plan
    let plan = plan::build(&params);
    tracing::debug!(?plan, "built plan");

    // 4. Execute
    match plan {
        Plan::Print(text) => Ok(Outcome::Printed(text)),
        plan if ctx.dry_run => Ok(Outcome::Previewed(plan.preview())),
        Plan::Persist { field, value } => {
            let path = store.set_and_persist(field, value.clone())?;
            Ok(Outcome::Persisted { field, value, path })
        }
        Plan::Steps(steps) => {
            let mut executor = Executor::new(runner, ctx.working_dir()?, ctx.verbosity());
            Ok(Outcome::Executed(executor.execute(&steps)))
        }
    }
}
