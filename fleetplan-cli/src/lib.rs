//! Command-line interface for the fleetplan vehicle routing tool.
//!
//! One invocation yields exactly one of a usage message, a solution document
//! or an error envelope. [`Orchestrator`] decides which; [`finish`] writes
//! it and picks the exit code.
#![forbid(unsafe_code)]

use std::io::Write;
use std::process::ExitCode;

use fleetplan_core::ErrorEnvelope;
use fleetplan_routing::HttpProviderFactory;
use fleetplan_solver_vrp::VrpEngine;

mod args;
mod diagnostics;
mod error;
mod input;
mod options;
mod orchestrator;
mod output;

pub use error::CliError;
pub use options::{Destination, MAX_EXPLORATION_LEVEL};
pub use orchestrator::{Orchestrator, Outcome, Stage};

/// Run the fleetplan CLI with the current process arguments.
#[must_use]
pub fn run() -> ExitCode {
    let engine = VrpEngine::new(HttpProviderFactory);
    let outcome = Orchestrator::new(&engine).execute(std::env::args_os());
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    ExitCode::from(finish(outcome, &mut stdout, &mut stderr))
}

/// Emit `outcome` and return the process exit code.
///
/// Usage text and solutions go to their destination; failures print
/// `[Error] <message>` on `stderr` and write the error envelope. A failed
/// final write is reported on `stderr` and turns the exit code to `1`.
pub fn finish(outcome: Outcome, stdout: &mut dyn Write, stderr: &mut dyn Write) -> u8 {
    let exit_code = outcome.exit_code();
    let written = match outcome {
        Outcome::Usage(text) => stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .map_err(|source| CliError::WriteOutput {
                destination: Destination::Stdout,
                source,
            }),
        Outcome::Solved {
            destination,
            solution,
        } => output::write_document(&*solution, &destination, stdout),
        Outcome::Failed {
            destination, error, ..
        } => {
            let message = error.to_string();
            report_error(stderr, &message);
            output::write_document(&ErrorEnvelope::new(message), &destination, stdout)
        }
    };
    if let Err(err) = written {
        report_error(stderr, &err.to_string());
        return 1;
    }
    exit_code
}

fn report_error(stderr: &mut dyn Write, message: &str) {
    if writeln!(stderr, "[Error] {message}").is_err() {
        log::error!("{message}");
    }
}

#[cfg(test)]
mod tests;
