//! Validated invocation options.

use std::fmt;

use camino::Utf8PathBuf;
use fleetplan_core::{DiagnosticLevel, RoutingBackend, RoutingOptions};

use crate::CliError;
use crate::args::DraftOptions;

/// Highest accepted exploration level; larger values are clamped.
pub const MAX_EXPLORATION_LEVEL: u32 = 5;

/// Where the result document goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// Standard output.
    #[default]
    Stdout,
    /// A file, created or truncated on write.
    File(Utf8PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("standard output"),
            Self::File(path) => write!(f, "{path:?}"),
        }
    }
}

/// Finalised configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionSet {
    pub(crate) routing: RoutingOptions,
    pub(crate) include_geometry: bool,
    pub(crate) input_file: Option<Utf8PathBuf>,
    pub(crate) output: Destination,
    pub(crate) threads: u32,
    pub(crate) exploration_level: u32,
    pub(crate) diagnostic_level: DiagnosticLevel,
    pub(crate) positional_input: Option<String>,
}

/// Destination named by `-o`, before anything else is validated.
///
/// Numeric failures are reported here even though the option set never
/// finalised.
pub(crate) fn destination_of(draft: &DraftOptions) -> Destination {
    destination_from(draft.output_file.clone())
}

/// Destination for a raw `-o` value; empty or absent means standard output.
pub(crate) fn destination_from(output: Option<String>) -> Destination {
    non_empty(output).map_or(Destination::Stdout, |path| {
        Destination::File(Utf8PathBuf::from(path))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn parse_unsigned(option: char, value: &str) -> Result<u32, CliError> {
    value
        .parse::<u32>()
        .map_err(|_| CliError::InvalidNumericOption {
            option,
            value: value.to_owned(),
        })
}

impl TryFrom<DraftOptions> for OptionSet {
    type Error = CliError;

    fn try_from(draft: DraftOptions) -> Result<Self, Self::Error> {
        let threads = parse_unsigned('t', &draft.threads)?;
        let exploration_level =
            parse_unsigned('x', &draft.exploration)?.min(MAX_EXPLORATION_LEVEL);

        let diagnostic_level = if draft.trace {
            DiagnosticLevel::Trace
        } else if draft.verbose {
            DiagnosticLevel::Info
        } else {
            DiagnosticLevel::Warning
        };
        let backend = if draft.embedded_routing {
            RoutingBackend::Embedded
        } else {
            RoutingBackend::Networked
        };
        let output = destination_of(&draft);

        Ok(Self {
            routing: RoutingOptions {
                address: draft.address,
                port: draft.port,
                profile: draft.profile,
                backend,
            },
            include_geometry: draft.geometry,
            input_file: non_empty(draft.input_file).map(Utf8PathBuf::from),
            output,
            threads,
            exploration_level,
            diagnostic_level,
            positional_input: draft.inputs.into_iter().next(),
        })
    }
}
