//! Command-line scanning.
//!
//! Flags follow getopt conventions: short options only, switches may be
//! clustered (`-gv`) and values may be attached (`-t8`) or separate
//! (`-t 8`). Unknown flags are skipped one by one instead of failing the
//! whole invocation, so the vector is pre-scanned before `clap` sees it.

use std::ffi::OsString;

use clap::{CommandFactory, Parser};

use crate::CliError;
use crate::options::{Destination, destination_from};

/// Short flags that take a value.
const VALUE_FLAGS: &[char] = &['a', 'i', 'm', 'o', 'p', 't', 'x'];
/// Short flags that stand alone.
const SWITCH_FLAGS: &[char] = &['g', 'l', 'v', 'V'];
/// Short flags requesting the usage text.
const HELP_FLAGS: &[char] = &['h', '?'];

const USAGE: &str = "fleetplan [OPTION]... \"INPUT\"
       fleetplan [OPTION]... -i FILE";

/// Raw option values, before numeric validation.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "fleetplan",
    version,
    about = "Solve vehicle routing problems described as JSON",
    override_usage = USAGE,
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\nOptions:\n{options}",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub(crate) struct DraftOptions {
    /// Routing server address
    #[arg(short = 'a', value_name = "ADDRESS", default_value = "0.0.0.0", allow_hyphen_values = true)]
    pub(crate) address: String,
    /// Routing server port
    #[arg(short = 'p', value_name = "PORT", default_value = "5000", allow_hyphen_values = true)]
    pub(crate) port: String,
    /// Routing profile name (currently has no effect)
    #[arg(short = 'm', value_name = "PROFILE", hide = true, allow_hyphen_values = true)]
    pub(crate) profile: Option<String>,
    /// Add detailed route geometry
    #[arg(short = 'g')]
    pub(crate) geometry: bool,
    /// Read input from FILE rather than from the command line
    #[arg(short = 'i', value_name = "FILE", allow_hyphen_values = true)]
    pub(crate) input_file: Option<String>,
    /// Use the embedded routing engine rather than a routing server
    #[arg(short = 'l')]
    pub(crate) embedded_routing: bool,
    /// Output file name
    #[arg(short = 'o', value_name = "OUTPUT", allow_hyphen_values = true)]
    pub(crate) output_file: Option<String>,
    /// Number of threads to use
    #[arg(short = 't', value_name = "THREADS", default_value = "4", allow_hyphen_values = true)]
    pub(crate) threads: String,
    /// Turn on verbose output
    #[arg(short = 'v')]
    pub(crate) verbose: bool,
    /// Turn on verbose output with all details
    #[arg(short = 'V')]
    pub(crate) trace: bool,
    /// Exploration level to use (0..5)
    #[arg(short = 'x', value_name = "EXPLORE", default_value = "1", allow_hyphen_values = true)]
    pub(crate) exploration: String,
    /// Problem description; only the first one is used
    #[arg(value_name = "INPUT")]
    pub(crate) inputs: Vec<String>,
}

/// Result of scanning the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedArgs {
    /// `-h` or `-?` was seen.
    Help,
    /// Flags were scanned into a draft.
    Draft(Box<DraftOptions>),
}

/// A command line that could not be scanned.
#[derive(Debug)]
pub(crate) struct ScanFailure {
    /// Destination named by the last `-o` seen before the failure.
    pub(crate) destination: Destination,
    /// Why scanning stopped.
    pub(crate) error: CliError,
}

/// Scan `argv` (program name first) into a [`ParsedArgs`].
///
/// Arguments that are not valid Unicode fail the scan once the help flags
/// have been ruled out.
pub(crate) fn parse_args<I, T>(argv: I) -> Result<ParsedArgs, ScanFailure>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut non_unicode = None;
    let texts = argv.into_iter().map(|arg| {
        let os_text: OsString = arg.into();
        os_text.into_string().unwrap_or_else(|invalid| {
            let text = invalid.to_string_lossy().into_owned();
            if non_unicode.is_none() {
                non_unicode = Some(text.clone());
            }
            text
        })
    });
    let scanned = match retain_known_flags(texts) {
        Scan::Help => return Ok(ParsedArgs::Help),
        Scan::Args(scanned) => scanned,
    };

    let destination = destination_from(scanned.output);
    if let Some(argument) = non_unicode {
        return Err(ScanFailure {
            destination,
            error: CliError::NonUnicodeArgument(argument),
        });
    }
    let mut draft =
        DraftOptions::try_parse_from(scanned.args).map_err(move |err| ScanFailure {
            destination,
            error: err.into(),
        })?;
    // Only the last verbosity flag stays set.
    match scanned.verbosity {
        Some(Verbosity::Info) => draft.trace = false,
        Some(Verbosity::Trace) => draft.verbose = false,
        None => {}
    }
    Ok(ParsedArgs::Draft(Box::new(draft)))
}

/// The usage text printed for `-h` and for a missing input.
pub(crate) fn usage() -> String {
    DraftOptions::command().render_help().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Info,
    Trace,
}

impl Verbosity {
    const fn of(flag: char) -> Option<Self> {
        match flag {
            'v' => Some(Self::Info),
            'V' => Some(Self::Trace),
            _ => None,
        }
    }
}

/// Arguments left for `clap`, plus what the scan noticed on the way.
#[derive(Debug, Default, PartialEq, Eq)]
struct Scanned {
    args: Vec<String>,
    output: Option<String>,
    verbosity: Option<Verbosity>,
}

#[derive(Debug, PartialEq, Eq)]
enum Scan {
    Help,
    Args(Scanned),
}

/// Drop unknown flags and detect help requests.
///
/// The value of a value flag is passed through untouched, even when it
/// begins with `-`. Everything after `--` is positional.
fn retain_known_flags(mut argv: impl Iterator<Item = String>) -> Scan {
    let mut scanned = Scanned {
        args: argv.next().into_iter().collect(),
        ..Scanned::default()
    };
    while let Some(arg) = argv.next() {
        if arg == "--" {
            scanned.args.push(arg);
            scanned.args.extend(argv);
            break;
        }
        if arg.starts_with("--") {
            continue;
        }
        let Some(cluster) = arg.strip_prefix('-').filter(|rest| !rest.is_empty()) else {
            scanned.args.push(arg);
            continue;
        };

        let mut flags = String::from("-");
        let mut value_flag = None;
        for (offset, flag) in cluster.char_indices() {
            if HELP_FLAGS.contains(&flag) {
                return Scan::Help;
            }
            if SWITCH_FLAGS.contains(&flag) {
                flags.push(flag);
                scanned.verbosity = Verbosity::of(flag).or(scanned.verbosity);
            } else if VALUE_FLAGS.contains(&flag) {
                let attached = cluster.get(offset + flag.len_utf8()..).unwrap_or_default();
                flags.push(flag);
                flags.push_str(attached);
                value_flag = Some((flag, attached));
                break;
            }
        }
        if flags.len() > 1 {
            scanned.args.push(flags);
        }

        let Some((flag, attached)) = value_flag else {
            continue;
        };
        let value = if attached.is_empty() {
            // A missing value is left for clap to report.
            let Some(next) = argv.next() else {
                continue;
            };
            scanned.args.push(next.clone());
            next
        } else {
            attached.to_owned()
        };
        if flag == 'o' {
            scanned.output = Some(value);
        }
    }
    Scan::Args(scanned)
}
