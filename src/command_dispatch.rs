//! Purpose: Hold top-level CLI command dispatch for `edtools`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Command stdout text and exit code semantics stay unchanged.
//! Invariants: Errors are returned to `main.rs` for emission; nothing is printed here on failure.

use super::*;

pub(super) fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "edtools", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output();
            Ok(RunOutcome::ok())
        }
        Command::Hello => {
            println!("Hello World");
            Ok(RunOutcome::ok())
        }
        Command::Sortjson { path } => {
            canonicalize_file(&path)?;
            Ok(RunOutcome::ok())
        }
    }
}
