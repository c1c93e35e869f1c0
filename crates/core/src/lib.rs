pub mod config;
pub mod job;
pub mod probe;
pub mod progress;
pub mod selection;
pub mod testing;
pub mod timecode;
pub mod transcode;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ProgressConfig,
    ToolsConfig,
};
pub use job::{JobError, JobOutcome, JobRunner, TranscodeJob};
pub use probe::{CodecType, FfprobeProber, ProbeError, ProbeResult, Prober, StreamDescriptor};
pub use progress::{MonitorHandle, NoopSink, ProgressMonitor, ProgressSink};
pub use selection::{select_tracks, LanguageTargets, SelectionError, TrackKind, TrackSelection};
pub use timecode::{parse_timecode, TimecodeError};
pub use transcode::{
    EncoderCapabilities, FfmpegTranscoder, TranscodeError, TranscodeHandle, TranscodeRequest,
    Transcoder,
};
