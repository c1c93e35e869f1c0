//! Stream probing via ffprobe.
//!
//! The prober asks ffprobe for every stream in a container and keeps only the
//! fields track selection needs: index, codec type, language and duration tags.
//!
//! # Example
//!
//! ```ignore
//! use hardsub_core::probe::{FfprobeProber, Prober};
//!
//! let prober = FfprobeProber::with_defaults();
//! let result = prober.probe(Path::new("/videos/episode.mkv")).await?;
//! for stream in &result.streams {
//!     println!("#{} {:?} {}", stream.index, stream.codec_type, stream.language);
//! }
//! ```

mod error;
mod ffprobe;
mod traits;
mod types;

pub use error::ProbeError;
pub use ffprobe::FfprobeProber;
pub use traits::Prober;
pub use types::{CodecType, ProbeResult, StreamDescriptor};
