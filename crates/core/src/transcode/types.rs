//! Types for the transcode module.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// NVIDIA NVENC H.264 encoder.
pub const VIDEO_CODEC: &str = "h264_nvenc";

/// Constant quality passed as `-crf`.
pub const VIDEO_CRF: u8 = 28;

/// Encoder preset.
pub const VIDEO_PRESET: &str = "slow";

/// Audio encoder.
pub const AUDIO_CODEC: &str = "aac";

/// Audio bitrate passed as `-b:a`.
pub const AUDIO_BITRATE: &str = "128k";

/// One transcode of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Input stream index of the audio track to keep.
    pub audio_index: u32,
    /// File ffmpeg writes `key=value` progress lines into.
    pub progress_path: PathBuf,
}

impl TranscodeRequest {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        audio_index: u32,
        progress_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            audio_index,
            progress_path: progress_path.into(),
        }
    }

    /// Builds the ffmpeg argument list.
    ///
    /// Video is mapped by type, so the first video stream is used. The
    /// subtitle filter reads the input file again and burns in its default
    /// subtitle stream.
    pub fn to_args(&self) -> Vec<OsString> {
        vec![
            "-i".into(),
            self.input.clone().into_os_string(),
            "-y".into(),
            "-map".into(),
            "0:v".into(),
            "-map".into(),
            format!("0:{}", self.audio_index).into(),
            "-vf".into(),
            subtitles_filter(&self.input),
            "-c:v".into(),
            VIDEO_CODEC.into(),
            "-crf".into(),
            VIDEO_CRF.to_string().into(),
            "-preset".into(),
            VIDEO_PRESET.into(),
            "-c:a".into(),
            AUDIO_CODEC.into(),
            "-b:a".into(),
            AUDIO_BITRATE.into(),
            "-progress".into(),
            self.progress_path.clone().into_os_string(),
            self.output.clone().into_os_string(),
        ]
    }
}

fn subtitles_filter(input: &Path) -> OsString {
    let mut filter = OsString::from("subtitles=");
    filter.push(input.as_os_str());
    filter
}
