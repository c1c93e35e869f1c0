//! Error types for the probe module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing a media file.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// FFprobe binary not found.
    #[error("FFprobe not found at path: {path}")]
    ToolNotFound { path: PathBuf },

    /// FFprobe could not be started.
    #[error("Error executing ffprobe command: {0}")]
    Io(#[from] std::io::Error),

    /// FFprobe ran but reported failure.
    #[error("ffprobe exited with {status}: {output}")]
    ToolFailed { status: String, output: String },

    /// FFprobe output was not the expected JSON document.
    #[error("Error parsing ffprobe output: {reason}")]
    Parse { reason: String },
}

impl ProbeError {
    /// Creates a new tool failure error from an exit status and combined output.
    pub fn tool_failed(status: impl ToString, output: &[u8]) -> Self {
        Self::ToolFailed {
            status: status.to_string(),
            output: String::from_utf8_lossy(output).trim().to_string(),
        }
    }

    /// Whether the error came from running the external tool rather than
    /// from reading its output.
    pub fn is_external(&self) -> bool {
        !matches!(self, Self::Parse { .. })
    }
}
