//! Error types for the transcode module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running ffmpeg.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// FFmpeg could not be started.
    #[error("Error starting ffmpeg command: {0}")]
    Spawn(#[source] std::io::Error),

    /// Waiting on the running ffmpeg process failed.
    #[error("Error waiting for ffmpeg: {0}")]
    Wait(#[source] std::io::Error),

    /// FFmpeg exited with a failure status.
    #[error("Error during video processing: ffmpeg exited with code {code:?}")]
    Failed {
        code: Option<i32>,
        stderr: Option<String>,
    },
}

impl TranscodeError {
    /// Creates a new failure error from an exit code and captured stderr.
    pub fn failed(code: Option<i32>, stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        Self::Failed {
            code,
            stderr: if stderr.is_empty() { None } else { Some(stderr) },
        }
    }

    /// Captured ffmpeg error output, if the process got far enough to emit any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Failed { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}
