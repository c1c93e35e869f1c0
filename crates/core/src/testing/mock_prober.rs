//! Mock prober for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::probe::{ProbeError, ProbeResult, Prober};

/// Mock implementation of the Prober trait.
///
/// Returns a configured [`ProbeResult`] (empty by default) and records every
/// probed path.
#[derive(Debug, Clone, Default)]
pub struct MockProber {
    /// Result returned for every probe.
    result: Arc<RwLock<ProbeResult>>,
    /// If set, the next probe will fail with this error.
    next_error: Arc<RwLock<Option<ProbeError>>>,
    /// Paths probed so far.
    probed: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockProber {
    /// Create a new mock prober.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result returned by subsequent probes.
    pub async fn set_result(&self, result: ProbeResult) {
        *self.result.write().await = result;
    }

    /// Configure the next probe to fail with the given error.
    pub async fn set_next_error(&self, error: ProbeError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get every path probed so far.
    pub async fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.read().await.clone()
    }
}

#[async_trait]
impl Prober for MockProber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, path: &Path) -> Result<ProbeResult, ProbeError> {
        self.probed.write().await.push(path.to_path_buf());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.result.read().await.clone())
    }
}
