//! Transcoding with ffmpeg.
//!
//! A [`TranscodeRequest`] carries the input, output, chosen audio stream and
//! the file ffmpeg streams `-progress` lines into. The argument list is fixed:
//! first video stream, the selected audio stream, subtitles from the input
//! burned in, NVENC H.264 video and AAC audio.
//!
//! # Example
//!
//! ```ignore
//! use hardsub_core::transcode::{FfmpegTranscoder, TranscodeRequest, Transcoder};
//!
//! let transcoder = FfmpegTranscoder::with_defaults();
//! transcoder.validate().await?;
//!
//! let request = TranscodeRequest::new("/videos/in.mkv", "out.mp4", 1, "/tmp/progress.txt");
//! let handle = transcoder.spawn(&request).await?;
//! // ... watch the progress file ...
//! handle.wait().await?;
//! ```

mod capabilities;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use capabilities::EncoderCapabilities;
pub use error::TranscodeError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::{TranscodeHandle, Transcoder};
pub use types::{
    TranscodeRequest, AUDIO_BITRATE, AUDIO_CODEC, VIDEO_CODEC, VIDEO_CRF, VIDEO_PRESET,
};
