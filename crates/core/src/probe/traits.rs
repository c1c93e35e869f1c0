//! Trait definitions for the probe module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ProbeError;
use super::types::ProbeResult;

/// Something that can list the streams of a media file.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Returns the name of this prober implementation.
    fn name(&self) -> &str;

    /// Lists every stream in the file, in container order.
    async fn probe(&self, path: &Path) -> Result<ProbeResult, ProbeError>;
}
