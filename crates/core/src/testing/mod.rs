//! Testing utilities and mock implementations.
//!
//! Mocks for the prober and transcoder traits plus a progress sink that
//! records every update, so a whole job can run without ffprobe or ffmpeg.
//!
//! # Example
//!
//! ```rust,ignore
//! use hardsub_core::testing::{fixtures, MockProber, MockTranscoder, RecordingSink};
//!
//! let prober = MockProber::new();
//! prober.set_result(fixtures::anime_episode()).await;
//!
//! let transcoder = MockTranscoder::new();
//! transcoder.set_progress_lines(vec!["out_time=00:00:05.000000".into()]).await;
//!
//! let runner = JobRunner::new(Config::default(), prober, transcoder.clone());
//! ```

mod mock_prober;
mod mock_transcoder;
mod recording_sink;

pub use mock_prober::MockProber;
pub use mock_transcoder::{MockTranscoder, RecordedTranscode};
pub use recording_sink::RecordingSink;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::probe::{CodecType, ProbeResult, StreamDescriptor};

    /// Create a stream descriptor.
    pub fn stream(index: u32, codec_type: CodecType, language: &str, duration: &str) -> StreamDescriptor {
        StreamDescriptor {
            index,
            codec_type,
            language: language.to_string(),
            duration: duration.to_string(),
        }
    }

    /// A typical fansub release: one video, English and Japanese audio,
    /// English and French subtitles, and a font attachment.
    pub fn anime_episode() -> ProbeResult {
        ProbeResult {
            streams: vec![
                stream(0, CodecType::Video, "", "00:23:40.000000"),
                stream(1, CodecType::Audio, "eng", "00:23:40.000000"),
                stream(2, CodecType::Audio, "jpn", "00:23:40.000000"),
                stream(3, CodecType::Subtitle, "eng", "00:23:38.000000"),
                stream(4, CodecType::Subtitle, "fre", "00:23:38.000000"),
                stream(5, CodecType::Other, "", ""),
            ],
        }
    }

    /// A file with only English tracks.
    pub fn english_only() -> ProbeResult {
        ProbeResult {
            streams: vec![
                stream(0, CodecType::Video, "", "01:45:00.000000"),
                stream(1, CodecType::Audio, "eng", "01:45:00.000000"),
                stream(2, CodecType::Subtitle, "eng", ""),
            ],
        }
    }
}
