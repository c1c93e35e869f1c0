//! Timecode parsing for ffprobe duration tags and ffmpeg progress lines.
//!
//! Both tools report elapsed time as `HH:MM:SS` with an optional fractional
//! suffix (`01:23:45.678000`). Only whole seconds matter for progress.

use thiserror::Error;

/// A timecode string did not have the `H:MM:SS[.ffffff]` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimecodeError {
    #[error("invalid time format: {input:?} (expected HH:MM:SS)")]
    FieldCount { input: String },

    #[error("error parsing hours in {input:?}")]
    Hours { input: String },

    #[error("error parsing minutes in {input:?}")]
    Minutes { input: String },

    #[error("error parsing seconds in {input:?}")]
    Seconds { input: String },

    #[error("time value out of range in {input:?}")]
    Overflow { input: String },
}

/// Parses a timecode into whole seconds.
///
/// The fractional part is read as a count of microseconds and scaled by 1e-6
/// before truncation, so `00:00:10.500000` is 10 and only fractions of a
/// million or more add a second. An unparsable fraction is ignored.
pub fn parse_timecode(input: &str) -> Result<u64, TimecodeError> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 3 {
        return Err(TimecodeError::FieldCount {
            input: input.to_string(),
        });
    }

    let hours: u64 = parts[0].parse().map_err(|_| TimecodeError::Hours {
        input: input.to_string(),
    })?;
    let minutes: u64 = parts[1].parse().map_err(|_| TimecodeError::Minutes {
        input: input.to_string(),
    })?;

    let mut seconds_parts = parts[2].split('.');
    let seconds: u64 = seconds_parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| TimecodeError::Seconds {
            input: input.to_string(),
        })?;

    let fraction_secs = seconds_parts
        .next()
        .and_then(|f| f.parse::<u64>().ok())
        .map(|micros| (micros as f64 * 1e-6) as u64)
        .unwrap_or(0);

    hours
        .checked_mul(3600)
        .and_then(|t| t.checked_add(minutes.checked_mul(60)?))
        .and_then(|t| t.checked_add(seconds))
        .and_then(|t| t.checked_add(fraction_secs))
        .ok_or_else(|| TimecodeError::Overflow {
            input: input.to_string(),
        })
}
