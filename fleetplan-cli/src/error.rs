//! Error types emitted by the fleetplan CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use camino::Utf8PathBuf;
use fleetplan_core::EngineError;
use thiserror::Error;

use crate::options::Destination;

/// Errors emitted by the fleetplan CLI.
///
/// The `Display` rendering is the message placed in the error envelope.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line could not be scanned.
    #[error("{}", .0.to_string().trim_end())]
    ArgumentParsing(#[from] clap::Error),
    /// An argument was not valid Unicode.
    #[error("Invalid UTF-8 in argument {0:?}.")]
    NonUnicodeArgument(String),
    /// `-t` or `-x` did not hold an unsigned integer.
    #[error("Wrong numerical value.")]
    InvalidNumericOption {
        /// Offending flag.
        option: char,
        /// Raw text given for it.
        value: String,
    },
    /// The `-i` file could not be read.
    #[error("failed to read input file {path:?}: {source}")]
    ReadInput {
        /// Path given to `-i`.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The engine rejected the problem.
    #[error(transparent)]
    ProblemBuild(EngineError),
    /// The engine failed while solving.
    #[error(transparent)]
    Solve(EngineError),
    /// Serialising the output document failed.
    #[error("failed to serialise output document: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the output document failed.
    #[error("failed to write {destination}: {source}")]
    WriteOutput {
        /// Where the document was headed.
        destination: Destination,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Whether the failure is attributable to the user's problem rather than
    /// to the engine's backend.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        match self {
            Self::ProblemBuild(err) | Self::Solve(err) => err.is_domain(),
            _ => true,
        }
    }
}
