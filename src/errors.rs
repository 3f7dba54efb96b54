use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatcurlError {
    /// The JSON request file could not be opened or parsed. Never fatal.
    #[error("could not read JSON file {}: {reason}", path.display())]
    ConfigRead { path: PathBuf, reason: String },

    #[error("a URL must be given either in the JSON file or with --url")]
    MissingUrl,

    #[error("malformed parameter '{token}', expected key=value")]
    MalformedParam { token: String },

    #[error("could not start {program}: {source}")]
    ProcessInvocation {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client ran but exited with a non-zero status.
    #[error("request failed with exit code {exit_code}")]
    RequestFailure { exit_code: i32 },

    #[error("could not write output to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write to the console: {source}")]
    ConsoleWrite {
        #[source]
        source: std::io::Error,
    },
}

impl BatcurlError {
    /// Exit code used when distinct exit codes are enabled.
    pub fn exit_code(&self) -> i32 {
        return match self {
            Self::ConfigRead { .. } => 0,
            Self::MissingUrl | Self::MalformedParam { .. } => 2,
            Self::ProcessInvocation { .. } => 3,
            Self::RequestFailure { .. } => 4,
            Self::OutputWrite { .. } | Self::ConsoleWrite { .. } => 5,
        };
    }
}
