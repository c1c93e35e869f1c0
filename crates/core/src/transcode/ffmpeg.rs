//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::capabilities::EncoderCapabilities;
use super::error::TranscodeError;
use super::traits::{TranscodeHandle, Transcoder};
use super::types::{TranscodeRequest, VIDEO_CODEC};
use crate::config::ToolsConfig;

/// Transcodes by running ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl FfmpegTranscoder {
    /// Creates a transcoder that runs the given ffmpeg binary.
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Creates a transcoder that runs `ffmpeg` from `PATH`.
    pub fn with_defaults() -> Self {
        Self::new("ffmpeg")
    }

    /// Creates a transcoder from the tools section of the configuration.
    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self::new(tools.ffmpeg_path.clone())
    }

    /// Renders the command line for logging.
    fn command_line(&self, request: &TranscodeRequest) -> String {
        std::iter::once(self.ffmpeg_path.as_os_str().to_os_string())
            .chain(request.to_args())
            .map(|a| a.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        let caps = EncoderCapabilities::detect(&self.ffmpeg_path).await?;
        if !caps.supports(VIDEO_CODEC) {
            warn!(
                encoder = VIDEO_CODEC,
                "Video encoder not listed by ffmpeg -encoders, transcoding will likely fail"
            );
        }
        Ok(())
    }

    async fn spawn(
        &self,
        request: &TranscodeRequest,
    ) -> Result<Box<dyn TranscodeHandle>, TranscodeError> {
        info!("Executing command: {}", self.command_line(request));

        let mut child = Command::new(&self.ffmpeg_path)
            .args(request.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::FfmpegNotFound {
                        path: self.ffmpeg_path.clone(),
                    }
                } else {
                    TranscodeError::Spawn(e)
                }
            })?;

        let stderr_task = child.stderr.take().map(|s| tokio::spawn(collect_errors(s)));

        Ok(Box::new(FfmpegProcess { child, stderr_task }))
    }
}

/// Drains ffmpeg's stderr so the pipe never fills, keeping lines that look
/// like errors.
async fn collect_errors(stderr: ChildStderr) -> String {
    let mut reader = BufReader::new(stderr).lines();
    let mut error_output = String::new();

    while let Ok(Some(line)) = reader.next_line().await {
        debug!(target: "ffmpeg", "{}", line);
        if line.contains("Error") || line.contains("error") {
            error_output.push_str(&line);
            error_output.push('\n');
        }
    }

    error_output
}

/// A running ffmpeg process.
struct FfmpegProcess {
    child: Child,
    stderr_task: Option<JoinHandle<String>>,
}

#[async_trait]
impl TranscodeHandle for FfmpegProcess {
    async fn wait(self: Box<Self>) -> Result<(), TranscodeError> {
        let mut process = *self;
        let status = process.child.wait().await.map_err(TranscodeError::Wait)?;

        let error_output = match process.stderr_task.take() {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        if !status.success() {
            return Err(TranscodeError::failed(status.code(), error_output));
        }

        debug!("ffmpeg exited successfully");
        Ok(())
    }
}
