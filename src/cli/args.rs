//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! Accepted only before the command token:
//! - `--cwd <path>`: Run emitted commands from that directory
//! - `--dry-run`: Print what would run, change nothing
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! Everything from the command token on is collected verbatim, including
//! tokens that start with `-` (`-v`, `-h`, `-help`). clap's own help and
//! version flags are disabled so those tokens reach the registry.

use clap::Parser;
use std::path::PathBuf;

/// Gerrit - short aliases for Gerrit clone, commit and review workflows
#[derive(Parser, Debug)]
#[command(name = "gerrit")]
#[command(about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Run emitted commands as if started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the commands that would run without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Command token followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tokens: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gerrit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn collects_command_and_args() {
        let cli = parse(&["commit", "fix the build"]);
        assert_eq!(cli.tokens, vec!["commit", "fix the build"]);
        assert!(!cli.dry_run);
    }

    #[test]
    fn hyphen_tokens_reach_registry() {
        assert_eq!(parse(&["-v"]).tokens, vec!["-v"]);
        assert_eq!(parse(&["-h"]).tokens, vec!["-h"]);
        assert_eq!(parse(&["-help"]).tokens, vec!["-help"]);
    }

    #[test]
    fn flags_before_command() {
        let cli = parse(&["--dry-run", "-q", "--cwd", "/tmp", "init", "repo"]);
        assert!(cli.dry_run);
        assert!(cli.quiet);
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp")));
        assert_eq!(cli.tokens, vec!["init", "repo"]);
    }

    #[test]
    fn flags_after_command_are_arguments() {
        let cli = parse(&["commit", "--debug"]);
        assert!(!cli.debug);
        assert_eq!(cli.tokens, vec!["commit", "--debug"]);
    }

    #[test]
    fn no_tokens() {
        assert!(parse(&[]).tokens.is_empty());
    }
}
