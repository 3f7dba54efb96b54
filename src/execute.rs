use crate::config::load_request_file;
use crate::errors::BatcurlError;
use crate::http_request::HttpRequest;
use crate::http_request_executor::HttpExecutor;
use crate::output::{handle_response, OutputOptions};
use crate::params::{resolve_request, CliRequest};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    pub file: Option<PathBuf>,
    pub request: CliRequest,
    pub response_only: bool,
    pub output_file: Option<PathBuf>,
    /// Exit with a distinct code per failure instead of always 0.
    pub strict_exit: bool,
}

/// Loads, merges, builds, executes and prints one request.
pub fn make_request<W: Write>(
    options: &RunOptions,
    executor: &dyn HttpExecutor,
    out: &mut W,
) -> Result<(), BatcurlError> {
    let cli = options.request.parse()?;
    let request_file = load_request_file(options.file.as_deref(), out);
    let spec = resolve_request(&request_file, &cli)?;
    let request = HttpRequest::from_spec(&spec);
    tracing::debug!(method = %request.method, url = %request.url, "request built");

    let result = executor.execute(&request)?;
    return handle_response(
        out,
        &result,
        &executor.command_line(&request),
        &OutputOptions {
            response_only: options.response_only,
            output_file: options.output_file.as_deref(),
        },
    );
}

/// Runs [`make_request`], reports any error on `out` and returns the process
/// exit status. Without `strict_exit` that status is always 0.
pub fn run<W: Write>(options: &RunOptions, executor: &dyn HttpExecutor, out: &mut W) -> i32 {
    let err = match make_request(options, executor, out) {
        Ok(()) => return 0,
        Err(err) => err,
    };
    tracing::debug!(error = %err, "request not completed");
    // the output handler already printed the client's stderr
    if !matches!(err, BatcurlError::RequestFailure { .. }) {
        if let Err(e) = writeln!(out, "ERROR: {}", err) {
            tracing::warn!(error = %e, "could not report the error on the console");
        }
    }
    return exit_status(&err, options.strict_exit);
}

pub fn exit_status(err: &BatcurlError, strict_exit: bool) -> i32 {
    return if strict_exit { err.exit_code() } else { 0 };
}
