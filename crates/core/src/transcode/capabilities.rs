//! Encoder detection from `ffmpeg -encoders`.

use std::collections::HashSet;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::error::TranscodeError;

/// Encoders compiled into the local ffmpeg build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncoderCapabilities {
    encoders: HashSet<String>,
}

impl EncoderCapabilities {
    /// Runs `ffmpeg -encoders` and reads the encoder table.
    ///
    /// Only a missing or unstartable binary is an error; an ffmpeg that exits
    /// with failure reports no encoders.
    pub async fn detect(ffmpeg_path: &Path) -> Result<Self, TranscodeError> {
        let output = Command::new(ffmpeg_path)
            .args(["-hide_banner", "-encoders"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::FfmpegNotFound {
                        path: ffmpeg_path.to_path_buf(),
                    }
                } else {
                    TranscodeError::Spawn(e)
                }
            })?;

        if !output.status.success() {
            return Ok(Self::default());
        }

        Ok(Self::from_encoder_list(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    /// Parses the table printed by `ffmpeg -encoders`.
    ///
    /// Rows look like ` V....D h264_nvenc   NVIDIA NVENC H.264 encoder`; the
    /// encoder name is the second column. Legend rows (` V..... = Video`)
    /// and the `------` separator are skipped.
    pub fn from_encoder_list(listing: &str) -> Self {
        let encoders = listing
            .lines()
            .filter_map(|line| {
                let mut cols = line.split_whitespace();
                let flags = cols.next()?;
                let name = cols.next()?;
                (flags.len() == 6 && name != "=").then(|| name.to_string())
            })
            .collect();
        Self { encoders }
    }

    /// Whether ffmpeg listed the named encoder.
    pub fn supports(&self, encoder: &str) -> bool {
        self.encoders.contains(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
Encoders:
 V..... = Video
 A..... = Audio
 ------
 V....D libx264              libx264 H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10 (codec h264)
 V....D h264_nvenc           NVIDIA NVENC H.264 encoder (codec h264)
 V....D hevc_nvenc           NVIDIA NVENC hevc encoder (codec hevc)
 V..... h264_vaapi           H.264/AVC (VAAPI) (codec h264)
 A....D aac                  AAC (Advanced Audio Coding)
";

    #[test]
    fn test_default_supports_nothing() {
        let caps = EncoderCapabilities::default();
        assert!(!caps.supports("h264_nvenc"));
        assert!(!caps.supports("aac"));
    }

    #[test]
    fn test_parse_encoder_list() {
        let caps = EncoderCapabilities::from_encoder_list(LISTING);
        assert!(caps.supports("h264_nvenc"));
        assert!(caps.supports("hevc_nvenc"));
        assert!(caps.supports("h264_vaapi"));
        assert!(caps.supports("libx264"));
        assert!(caps.supports("aac"));
        assert!(!caps.supports("av1_nvenc"));
    }

    #[test]
    fn test_legend_rows_are_not_encoders() {
        let caps = EncoderCapabilities::from_encoder_list(LISTING);
        assert!(!caps.supports("="));
        assert!(!caps.supports("Video"));
        assert!(!caps.supports("Encoders:"));
    }

    #[test]
    fn test_description_mentions_do_not_count() {
        let caps = EncoderCapabilities::from_encoder_list(
            " V....D libx264   libx264 H.264 h264_nvenc-compatible (codec h264)\n",
        );
        assert!(caps.supports("libx264"));
        assert!(!caps.supports("h264_nvenc"));
    }

    #[test]
    fn test_nvenc_missing_from_software_build() {
        let caps = EncoderCapabilities::from_encoder_list(
            " V....D libx264              libx264 H.264 / AVC (codec h264)\n A....D aac                  AAC (Advanced Audio Coding)\n",
        );
        assert!(!caps.supports("h264_nvenc"));
    }

    #[tokio::test]
    async fn test_detect_missing_binary() {
        let err = EncoderCapabilities::detect(Path::new("/nonexistent/bin/ffmpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscodeError::FfmpegNotFound { .. }));
    }
}
