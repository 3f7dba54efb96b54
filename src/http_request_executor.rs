use crate::errors::BatcurlError;
use crate::http_request::{HttpMethod, HttpRequest};
use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::process::Command;
use std::time::Duration;

/// What the HTTP client reported for one request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        return self.exit_code == 0;
    }
}

/// Something that can carry out an [`HttpRequest`].
pub trait HttpExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<ExecutionResult, BatcurlError>;

    /// The command line echoed back to the user for `request`.
    fn command_line(&self, request: &HttpRequest) -> Vec<String>;
}

/// `curl -s -X <METHOD> <url> [-d <body>] [--max-time N]`
pub fn curl_args(program: &str, request: &HttpRequest, timeout: Option<Duration>) -> Vec<String> {
    let mut args = vec![
        program.to_string(),
        "-s".to_string(),
        "-X".to_string(),
        request.method.to_string(),
        request.url.clone(),
    ];
    if let Some(body) = &request.body {
        args.push("-d".to_string());
        args.push(body.clone());
    }
    if let Some(timeout) = timeout {
        args.push("--max-time".to_string());
        args.push(timeout.as_secs_f64().to_string());
    }
    return args;
}

/// Runs the request through an external curl process.
#[derive(Debug, Clone)]
pub struct CurlExecutor {
    program: String,
    timeout: Option<Duration>,
}

impl CurlExecutor {
    pub fn new(program: &str, timeout: Option<Duration>) -> CurlExecutor {
        return CurlExecutor { program: program.to_string(), timeout };
    }
}

impl Default for CurlExecutor {
    fn default() -> Self {
        return CurlExecutor::new("curl", None);
    }
}

impl HttpExecutor for CurlExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<ExecutionResult, BatcurlError> {
        let args = self.command_line(request);
        tracing::debug!(command = ?args, "spawning http client");
        let output = Command::new(&args[0])
            .args(&args[1..])
            .output()
            .map_err(|source| BatcurlError::ProcessInvocation {
                program: self.program.clone(),
                source,
            })?;
        // killed by a signal
        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!(exit_code, "http client finished");
        return Ok(ExecutionResult {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    fn command_line(&self, request: &HttpRequest) -> Vec<String> {
        return curl_args(&self.program, request, self.timeout);
    }
}

/// Runs the request in-process with a blocking reqwest client. Transport
/// failures are reported as a non-zero exit code; HTTP error statuses are not.
pub struct NativeExecutor {
    client: reqwest::blocking::Client,
    timeout: Option<Duration>,
}

impl NativeExecutor {
    pub fn new(timeout: Option<Duration>) -> Result<NativeExecutor> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("while building the http client")?;
        return Ok(NativeExecutor { client, timeout });
    }

    fn send(&self, request: &HttpRequest) -> reqwest::Result<String> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"))
                .body(body.clone()),
            None => builder,
        };
        let response = builder.send()?;
        tracing::debug!(status = %response.status(), "response received");
        return response.text();
    }
}

impl HttpExecutor for NativeExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<ExecutionResult, BatcurlError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        return Ok(match self.send(request) {
            Ok(stdout) => ExecutionResult { exit_code: 0, stdout, stderr: String::new() },
            Err(err) => ExecutionResult {
                exit_code: 1,
                stdout: String::new(),
                stderr: format!("{:#}", anyhow::Error::new(err)),
            },
        });
    }

    fn command_line(&self, request: &HttpRequest) -> Vec<String> {
        return curl_args("curl", request, self.timeout);
    }
}
