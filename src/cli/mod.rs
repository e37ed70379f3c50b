//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse global flags and collect raw command tokens
//! - Initialize logging
//! - Load the config store once at process start
//! - Run the engine pipeline and render its outcome
//! - Turn any error into a single `error:` line and a failing exit status
//!
//! The CLI layer is thin. All decisions happen in [`crate::engine`].

pub mod args;

pub use args::Cli;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::ConfigStore;
use crate::core::paths::ConfigPaths;
use crate::engine::{self, Context, Outcome, ProcessRunner};
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        dry_run: cli.dry_run,
    };
    init_logging(ctx.verbosity());

    match execute(&cli.tokens, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` if set, otherwise a level derived from the flags.
fn init_logging(verbosity: Verbosity) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity.log_filter())
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the store, run the pipeline, and render the outcome.
pub fn execute(tokens: &[String], ctx: &Context) -> Result<()> {
    let mut store =
        ConfigStore::load(ConfigPaths::resolve()).context("failed to load config")?;

    let outcome = engine::run(tokens, &mut store, &mut ProcessRunner, ctx)?;
    render(&outcome, ctx.verbosity());
    Ok(())
}

/// Show the result of a successful invocation.
pub fn render(outcome: &Outcome, verbosity: Verbosity) {
    match outcome {
        Outcome::Printed(text) => output::emit(text),
        Outcome::Persisted { field, value, path } => {
            output::print(format!("Set {} = {}", field, value), verbosity);
            tracing::debug!(path = %path.display(), "config written");
        }
        Outcome::Executed(report) => {
            let failed = report.failures().count();
            if failed > 0 {
                tracing::debug!(failed, total = report.steps.len(), "some steps failed");
            }
        }
        Outcome::Previewed(lines) => {
            for line in lines {
                output::emit(line);
            }
        }
    }
}
