//! Acquisition of the raw problem text.

use fleetplan_fs::read_utf8_to_string;
use log::debug;

use crate::CliError;
use crate::options::OptionSet;

/// Resolve the problem text for `options`.
///
/// A non-empty `-i` path always wins over the positional argument. Returns
/// `Ok(None)` when neither supplies any text, which callers answer with the
/// usage message.
pub(crate) fn acquire_input(options: &OptionSet) -> Result<Option<String>, CliError> {
    if let Some(path) = &options.input_file {
        debug!("Reading problem from {path}");
        let text = read_utf8_to_string(path).map_err(|source| CliError::ReadInput {
            path: path.clone(),
            source,
        })?;
        return Ok(Some(text));
    }
    Ok(options.positional_input.clone())
}
