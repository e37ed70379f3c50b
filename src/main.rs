use std::process::ExitCode;

fn main() -> ExitCode {
    gerrit_cli::cli::run()
}
