//! FFprobe-based prober implementation.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::error::ProbeError;
use super::traits::Prober;
use super::types::ProbeResult;
use crate::config::ToolsConfig;

/// Lists streams by running ffprobe.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: PathBuf,
}

impl FfprobeProber {
    /// Creates a prober that runs the given ffprobe binary.
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Creates a prober that runs `ffprobe` from `PATH`.
    pub fn with_defaults() -> Self {
        Self::new("ffprobe")
    }

    /// Creates a prober from the tools section of the configuration.
    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self::new(tools.ffprobe_path.clone())
    }

    fn build_args(path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-v", "quiet", "-print_format", "json", "-show_streams"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(path.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    fn name(&self) -> &str {
        "ffprobe"
    }

    async fn probe(&self, path: &Path) -> Result<ProbeResult, ProbeError> {
        let output = Command::new(&self.ffprobe_path)
            .args(Self::build_args(path))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::ToolNotFound {
                        path: self.ffprobe_path.clone(),
                    }
                } else {
                    ProbeError::Io(e)
                }
            })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            return Err(ProbeError::tool_failed(output.status, &combined));
        }

        debug!(bytes = combined.len(), "ffprobe finished");
        ProbeResult::from_json(&combined)
    }
}
