//! Rendering of result documents.

use std::io::Write;

use fleetplan_fs::create_utf8_file;
use serde::Serialize;

use crate::CliError;
use crate::options::Destination;

/// Render `document` as pretty-printed JSON followed by a newline.
pub(crate) fn render_document<T: Serialize>(document: &T) -> Result<String, CliError> {
    let mut payload = serde_json::to_string_pretty(document).map_err(CliError::SerialiseOutput)?;
    payload.push('\n');
    Ok(payload)
}

/// Write `document` to `destination`.
///
/// `stdout` stands in for standard output so callers and tests can capture
/// it. Files are created or truncated; their parent directory must exist.
pub(crate) fn write_document<T: Serialize>(
    document: &T,
    destination: &Destination,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    let payload = render_document(document)?;
    let write_error = |source| CliError::WriteOutput {
        destination: destination.clone(),
        source,
    };
    match destination {
        Destination::Stdout => {
            stdout.write_all(payload.as_bytes()).map_err(write_error)?;
            stdout.flush().map_err(write_error)
        }
        Destination::File(path) => {
            let mut file = create_utf8_file(path).map_err(write_error)?;
            file.write_all(payload.as_bytes()).map_err(write_error)
        }
    }
}
