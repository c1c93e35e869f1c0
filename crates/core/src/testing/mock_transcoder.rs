//! Mock transcoder for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::transcode::{TranscodeError, TranscodeHandle, TranscodeRequest, Transcoder};

/// A recorded transcode for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    /// The request that was spawned.
    pub request: TranscodeRequest,
    /// Whether the progress file existed when the transcode was spawned.
    pub progress_file_existed: bool,
}

/// Mock implementation of the Transcoder trait.
///
/// Provides controllable behavior for testing:
/// - Track spawned requests for assertions
/// - Simulate spawn failures and failing exits
/// - Append progress lines to the request's progress file while "running"
#[derive(Debug, Clone)]
pub struct MockTranscoder {
    /// Recorded transcodes.
    spawned: Arc<RwLock<Vec<RecordedTranscode>>>,
    /// If set, the next spawn will fail with this error.
    next_spawn_error: Arc<RwLock<Option<TranscodeError>>>,
    /// Exit code reported by wait; `None` means success.
    exit_failure: Arc<RwLock<Option<i32>>>,
    /// Lines appended to the progress file, one per step.
    progress_lines: Arc<RwLock<Vec<String>>>,
    /// Pause between progress lines.
    step_delay: Arc<RwLock<Duration>>,
    /// Number of validate calls.
    validations: Arc<RwLock<usize>>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self {
            spawned: Arc::new(RwLock::new(Vec::new())),
            next_spawn_error: Arc::new(RwLock::new(None)),
            exit_failure: Arc::new(RwLock::new(None)),
            progress_lines: Arc::new(RwLock::new(Vec::new())),
            step_delay: Arc::new(RwLock::new(Duration::from_millis(5))),
            validations: Arc::new(RwLock::new(0)),
        }
    }

    /// Get all recorded transcodes.
    pub async fn recorded_transcodes(&self) -> Vec<RecordedTranscode> {
        self.spawned.read().await.clone()
    }

    /// Get the number of transcodes spawned.
    pub async fn spawn_count(&self) -> usize {
        self.spawned.read().await.len()
    }

    /// Get the number of validate calls.
    pub async fn validation_count(&self) -> usize {
        *self.validations.read().await
    }

    /// Configure the next spawn to fail with the given error.
    pub async fn set_next_spawn_error(&self, error: TranscodeError) {
        *self.next_spawn_error.write().await = Some(error);
    }

    /// Make spawned transcodes exit with the given failure code.
    pub async fn set_exit_failure(&self, code: i32) {
        *self.exit_failure.write().await = Some(code);
    }

    /// Set the progress lines written while a transcode runs.
    pub async fn set_progress_lines(&self, lines: Vec<String>) {
        *self.progress_lines.write().await = lines;
    }

    /// Set the pause between progress lines.
    pub async fn set_step_delay(&self, delay: Duration) {
        *self.step_delay.write().await = delay;
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        *self.validations.write().await += 1;
        Ok(())
    }

    async fn spawn(
        &self,
        request: &TranscodeRequest,
    ) -> Result<Box<dyn TranscodeHandle>, TranscodeError> {
        if let Some(err) = self.next_spawn_error.write().await.take() {
            return Err(err);
        }

        self.spawned.write().await.push(RecordedTranscode {
            request: request.clone(),
            progress_file_existed: request.progress_path.exists(),
        });

        Ok(Box::new(MockHandle {
            progress_path: request.progress_path.clone(),
            lines: self.progress_lines.read().await.clone(),
            step_delay: *self.step_delay.read().await,
            exit_failure: *self.exit_failure.read().await,
        }))
    }
}

struct MockHandle {
    progress_path: PathBuf,
    lines: Vec<String>,
    step_delay: Duration,
    exit_failure: Option<i32>,
}

#[async_trait]
impl TranscodeHandle for MockHandle {
    async fn wait(self: Box<Self>) -> Result<(), TranscodeError> {
        if !self.lines.is_empty() {
            let mut file = tokio::fs::OpenOptions::new()
                .append(true)
                .open(&self.progress_path)
                .await
                .map_err(TranscodeError::Wait)?;

            for line in &self.lines {
                file.write_all(format!("{}\n", line).as_bytes())
                    .await
                    .map_err(TranscodeError::Wait)?;
                file.flush().await.map_err(TranscodeError::Wait)?;
                tokio::time::sleep(self.step_delay).await;
            }
        }

        match self.exit_failure {
            Some(code) => Err(TranscodeError::failed(
                Some(code),
                "Error while processing the decoded data",
            )),
            None => Ok(()),
        }
    }
}
