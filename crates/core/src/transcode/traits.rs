//! Trait definitions for the transcode module.

use async_trait::async_trait;

use super::error::TranscodeError;
use super::types::TranscodeRequest;

/// Something that can launch a transcode.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Checks that the transcoder is ready to run.
    async fn validate(&self) -> Result<(), TranscodeError>;

    /// Starts the transcode and returns without waiting for it to finish.
    async fn spawn(
        &self,
        request: &TranscodeRequest,
    ) -> Result<Box<dyn TranscodeHandle>, TranscodeError>;
}

/// A running transcode.
#[async_trait]
pub trait TranscodeHandle: Send {
    /// Waits for the transcode to exit. A failure exit is an error.
    async fn wait(self: Box<Self>) -> Result<(), TranscodeError>;
}
