//! Types for the probe module.

use serde::{Deserialize, Serialize};

use super::error::ProbeError;

/// Kind of elementary stream as reported by ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    Subtitle,
    /// Data, attachment and anything else ffprobe may report.
    #[serde(other)]
    Other,
}

/// One stream of a probed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    /// Stream index within the input, as used by `-map 0:<index>`.
    pub index: u32,
    pub codec_type: CodecType,
    /// `language` tag, empty when absent.
    pub language: String,
    /// `DURATION` tag as a timecode, empty when absent.
    pub duration: String,
}

/// Streams of a probed file, in the order ffprobe reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub streams: Vec<StreamDescriptor>,
}

#[derive(Deserialize)]
struct ProbeOutput {
    streams: Vec<ProbeStream>,
}

#[derive(Deserialize)]
struct ProbeStream {
    index: u32,
    codec_type: CodecType,
    #[serde(default)]
    tags: ProbeTags,
}

#[derive(Default, Deserialize)]
struct ProbeTags {
    #[serde(default)]
    language: String,
    #[serde(default, rename = "DURATION")]
    duration: String,
}

impl ProbeResult {
    /// Parses the JSON document printed by `ffprobe -print_format json -show_streams`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProbeError> {
        let output: ProbeOutput =
            serde_json::from_slice(bytes).map_err(|e| ProbeError::Parse {
                reason: e.to_string(),
            })?;

        let streams = output
            .streams
            .into_iter()
            .map(|s| StreamDescriptor {
                index: s.index,
                codec_type: s.codec_type,
                language: s.tags.language,
                duration: s.tags.duration,
            })
            .collect();

        Ok(Self { streams })
    }
}
