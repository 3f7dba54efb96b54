//! Renders an [`ExecutionResult`] for the user.

use crate::errors::BatcurlError;
use crate::http_request_executor::ExecutionResult;
use std::io::{self, Write};
use std::path::Path;

pub struct OutputOptions<'a> {
    /// Skip the status and command line echo.
    pub response_only: bool,
    /// Write the response body here instead of `out`.
    pub output_file: Option<&'a Path>,
}

fn console_write(source: io::Error) -> BatcurlError {
    return BatcurlError::ConsoleWrite { source };
}

/// Prints `result` to `out`, or saves the body to the output file.
///
/// A failed request only prints the client's stderr and returns
/// [`BatcurlError::RequestFailure`] so the caller can pick an exit status.
pub fn handle_response<W: Write>(
    out: &mut W,
    result: &ExecutionResult,
    command_line: &[String],
    options: &OutputOptions<'_>,
) -> Result<(), BatcurlError> {
    if !result.success() {
        writeln!(out, "Request failed: {}", result.stderr).map_err(console_write)?;
        return Err(BatcurlError::RequestFailure { exit_code: result.exit_code });
    }

    if !options.response_only {
        writeln!(out, "Status: {}", result.exit_code).map_err(console_write)?;
        writeln!(out, "Command: {}", command_line.join(" ")).map_err(console_write)?;
    }

    if !result.stdout.is_empty() {
        match options.output_file {
            Some(path) => {
                std::fs::write(path, &result.stdout).map_err(|source| BatcurlError::OutputWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), bytes = result.stdout.len(), "response saved");
                writeln!(out, "Response saved to: {}", path.display()).map_err(console_write)?;
            }
            None => {
                writeln!(out, "{}", result.stdout).map_err(console_write)?;
            }
        }
    }

    if !result.stderr.is_empty() {
        writeln!(out, "Error:").map_err(console_write)?;
        writeln!(out, "{}", result.stderr).map_err(console_write)?;
    }
    return Ok(());
}
