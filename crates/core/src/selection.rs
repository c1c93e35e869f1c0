//! Track selection by language tag.

use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::probe::{CodecType, ProbeResult};
use crate::timecode::{parse_timecode, TimecodeError};

/// Audio language kept in the output.
pub const AUDIO_LANGUAGE: &str = "jpn";

/// Subtitle language burned into the output.
pub const SUBTITLE_LANGUAGE: &str = "fre";

/// Which kind of track a selection failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Subtitle,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// Errors that can occur during track selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// No stream of the requested kind carries the requested language.
    #[error("No {kind} track found with language {language:?}")]
    TrackNotFound { kind: TrackKind, language: String },

    /// A stream's DURATION tag is not a timecode.
    #[error("Error parsing duration of stream {index}: {source}")]
    Duration {
        index: u32,
        #[source]
        source: TimecodeError,
    },
}

/// Languages to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTargets {
    pub audio: String,
    pub subtitle: String,
}

impl Default for LanguageTargets {
    fn default() -> Self {
        Self {
            audio: AUDIO_LANGUAGE.to_string(),
            subtitle: SUBTITLE_LANGUAGE.to_string(),
        }
    }
}

/// Tracks chosen for a transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSelection {
    pub audio_index: u32,
    /// Only proves a matching subtitle exists; burn-in reads the input's
    /// default subtitle stream.
    pub subtitle_index: u32,
    /// Whole seconds from the last stream carrying a DURATION tag, 0 if none.
    pub total_duration_secs: u64,
}

/// Scans the probed streams once, in order.
///
/// The first audio and the first subtitle stream with a matching language
/// win. Duration is taken from the last stream that carries a DURATION tag,
/// whatever its kind.
pub fn select_tracks(
    probe: &ProbeResult,
    targets: &LanguageTargets,
) -> Result<TrackSelection, SelectionError> {
    let mut audio_index = None;
    let mut subtitle_index = None;
    let mut total_duration_secs = 0;

    for stream in &probe.streams {
        match stream.codec_type {
            CodecType::Audio if audio_index.is_none() && stream.language == targets.audio => {
                info!(index = stream.index, language = %stream.language, "Found audio track");
                audio_index = Some(stream.index);
            }
            CodecType::Subtitle
                if subtitle_index.is_none() && stream.language == targets.subtitle =>
            {
                info!(index = stream.index, language = %stream.language, "Found subtitle track");
                subtitle_index = Some(stream.index);
            }
            _ => {}
        }

        if !stream.duration.is_empty() {
            total_duration_secs =
                parse_timecode(&stream.duration).map_err(|source| SelectionError::Duration {
                    index: stream.index,
                    source,
                })?;
            debug!(index = stream.index, secs = total_duration_secs, "Duration tag");
        }
    }

    let audio_index = audio_index.ok_or_else(|| SelectionError::TrackNotFound {
        kind: TrackKind::Audio,
        language: targets.audio.clone(),
    })?;
    let subtitle_index = subtitle_index.ok_or_else(|| SelectionError::TrackNotFound {
        kind: TrackKind::Subtitle,
        language: targets.subtitle.clone(),
    })?;

    Ok(TrackSelection {
        audio_index,
        subtitle_index,
        total_duration_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StreamDescriptor;

    fn stream(index: u32, codec_type: CodecType, language: &str, duration: &str) -> StreamDescriptor {
        StreamDescriptor {
            index,
            codec_type,
            language: language.to_string(),
            duration: duration.to_string(),
        }
    }

    fn probe(streams: Vec<StreamDescriptor>) -> ProbeResult {
        ProbeResult { streams }
    }

    #[test]
    fn test_selects_matching_tracks() {
        let result = probe(vec![
            stream(0, CodecType::Video, "", ""),
            stream(1, CodecType::Audio, "eng", ""),
            stream(2, CodecType::Audio, "jpn", ""),
            stream(3, CodecType::Subtitle, "eng", ""),
            stream(4, CodecType::Subtitle, "ger", ""),
            stream(5, CodecType::Subtitle, "fre", ""),
        ]);

        let selection = select_tracks(&result, &LanguageTargets::default()).unwrap();
        assert_eq!(selection.audio_index, 2);
        assert_eq!(selection.subtitle_index, 5);
    }

    #[test]
    fn test_selection_independent_of_order() {
        let result = probe(vec![
            stream(5, CodecType::Subtitle, "fre", ""),
            stream(0, CodecType::Video, "", ""),
            stream(2, CodecType::Audio, "jpn", ""),
        ]);

        let selection = select_tracks(&result, &LanguageTargets::default()).unwrap();
        assert_eq!(selection.audio_index, 2);
        assert_eq!(selection.subtitle_index, 5);
    }

    #[test]
    fn test_first_match_wins() {
        let result = probe(vec![
            stream(1, CodecType::Audio, "jpn", ""),
            stream(2, CodecType::Audio, "jpn", ""),
            stream(3, CodecType::Subtitle, "fre", ""),
            stream(4, CodecType::Subtitle, "fre", ""),
        ]);

        let selection = select_tracks(&result, &LanguageTargets::default()).unwrap();
        assert_eq!(selection.audio_index, 1);
        assert_eq!(selection.subtitle_index, 3);
    }

    #[test]
    fn test_language_must_match_codec_type() {
        // A French audio track and a Japanese subtitle track satisfy nothing.
        let result = probe(vec![
            stream(1, CodecType::Audio, "fre", ""),
            stream(2, CodecType::Subtitle, "jpn", ""),
        ]);

        let err = select_tracks(&result, &LanguageTargets::default()).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::TrackNotFound {
                kind: TrackKind::Audio,
                ..
            }
        ));
    }

    #[test]
    fn test_language_match_is_exact() {
        let result = probe(vec![
            stream(1, CodecType::Audio, "JPN", ""),
            stream(2, CodecType::Subtitle, "fre", ""),
        ]);
        assert!(select_tracks(&result, &LanguageTargets::default()).is_err());
    }

    #[test]
    fn test_missing_audio() {
        let result = probe(vec![
            stream(0, CodecType::Video, "", ""),
            stream(1, CodecType::Audio, "eng", ""),
            stream(2, CodecType::Subtitle, "fre", ""),
        ]);

        let err = select_tracks(&result, &LanguageTargets::default()).unwrap_err();
        match err {
            SelectionError::TrackNotFound { kind, language } => {
                assert_eq!(kind, TrackKind::Audio);
                assert_eq!(language, "jpn");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_subtitle() {
        let result = probe(vec![
            stream(0, CodecType::Video, "", ""),
            stream(1, CodecType::Audio, "jpn", ""),
        ]);

        let err = select_tracks(&result, &LanguageTargets::default()).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::TrackNotFound {
                kind: TrackKind::Subtitle,
                ..
            }
        ));
        assert_eq!(err.to_string(), "No subtitle track found with language \"fre\"");
    }

    #[test]
    fn test_last_duration_wins() {
        let result = probe(vec![
            stream(0, CodecType::Video, "", "00:10:00"),
            stream(1, CodecType::Audio, "jpn", "00:20:00"),
            stream(2, CodecType::Subtitle, "fre", ""),
        ]);

        let selection = select_tracks(&result, &LanguageTargets::default()).unwrap();
        assert_eq!(selection.total_duration_secs, 1200);
    }

    #[test]
    fn test_duration_from_unselected_stream() {
        let result = probe(vec![
            stream(1, CodecType::Audio, "jpn", "00:10:00"),
            stream(2, CodecType::Subtitle, "fre", ""),
            stream(3, CodecType::Other, "", "00:00:30"),
        ]);

        let selection = select_tracks(&result, &LanguageTargets::default()).unwrap();
        assert_eq!(selection.total_duration_secs, 30);
    }

    #[test]
    fn test_no_duration_is_zero() {
        let result = probe(vec![
            stream(1, CodecType::Audio, "jpn", ""),
            stream(2, CodecType::Subtitle, "fre", ""),
        ]);

        let selection = select_tracks(&result, &LanguageTargets::default()).unwrap();
        assert_eq!(selection.total_duration_secs, 0);
    }

    #[test]
    fn test_malformed_duration_fails() {
        let result = probe(vec![
            stream(0, CodecType::Video, "", "12 minutes"),
            stream(1, CodecType::Audio, "jpn", ""),
            stream(2, CodecType::Subtitle, "fre", ""),
        ]);

        let err = select_tracks(&result, &LanguageTargets::default()).unwrap_err();
        assert!(matches!(err, SelectionError::Duration { index: 0, .. }));
    }

    #[test]
    fn test_out_of_range_duration_fails() {
        let result = probe(vec![
            stream(0, CodecType::Video, "", ""),
            stream(1, CodecType::Audio, "jpn", "18446744073709551:00:00"),
            stream(2, CodecType::Subtitle, "fre", ""),
        ]);

        let err = select_tracks(&result, &LanguageTargets::default()).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::Duration {
                index: 1,
                source: TimecodeError::Overflow { .. }
            }
        ));
    }

    #[test]
    fn test_custom_targets() {
        let targets = LanguageTargets {
            audio: "eng".to_string(),
            subtitle: "spa".to_string(),
        };
        let result = probe(vec![
            stream(1, CodecType::Audio, "jpn", ""),
            stream(2, CodecType::Audio, "eng", ""),
            stream(3, CodecType::Subtitle, "spa", ""),
        ]);

        let selection = select_tracks(&result, &targets).unwrap();
        assert_eq!(selection.audio_index, 2);
        assert_eq!(selection.subtitle_index, 3);
    }
}
