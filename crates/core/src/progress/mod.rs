//! Progress reporting from ffmpeg's `-progress` file.
//!
//! ffmpeg keeps appending blocks of `key=value` lines to the file while it
//! runs; each block carries an `out_time=HH:MM:SS.ffffff` line. The monitor
//! re-reads the whole file on every tick instead of tracking an offset, so a
//! half-written trailing line is simply picked up complete on the next tick.
//! Nothing synchronises the writer and the reader.

mod monitor;

pub use monitor::{MonitorHandle, ProgressMonitor, DEFAULT_POLL_INTERVAL};

use crate::timecode::{parse_timecode, TimecodeError};

/// Receives progress updates for display.
pub trait ProgressSink: Send + Sync {
    /// Called once before the transcode starts with the total duration.
    fn start(&self, total_secs: u64);

    /// Sets the absolute elapsed position.
    fn set_position(&self, secs: u64);

    /// Called once after the transcode exits.
    fn finish(&self, message: &str);
}

/// A sink that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn start(&self, _total_secs: u64) {}
    fn set_position(&self, _secs: u64) {}
    fn finish(&self, _message: &str) {}
}

/// Parses every `out_time=` line of a progress file, in file order.
pub fn out_times(contents: &str) -> impl Iterator<Item = Result<u64, TimecodeError>> + '_ {
    contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix("out_time="))
        .map(|value| parse_timecode(value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRESS_FILE: &str = "\
frame=0
fps=0.00
bitrate=N/A
total_size=0
out_time_us=N/A
out_time_ms=N/A
out_time=N/A
speed=N/A
progress=continue
frame=120
fps=59.94
out_time_us=5005000
out_time_ms=5005000
out_time=00:00:05.005000
speed=2.5x
progress=continue
frame=240
out_time=00:01:10.010000
progress=end
";

    #[test]
    fn test_out_times_in_order() {
        let times: Vec<_> = out_times(PROGRESS_FILE).collect();
        assert_eq!(times.len(), 3);
        assert!(times[0].is_err());
        assert_eq!(times[1], Ok(5));
        assert_eq!(times[2], Ok(70));
    }

    #[test]
    fn test_out_time_variants_are_not_matched() {
        let contents = "out_time_us=5005000\nout_time_ms=5005000\n";
        assert_eq!(out_times(contents).count(), 0);
    }

    #[test]
    fn test_whitespace_around_value() {
        let times: Vec<_> = out_times("out_time= 00:00:42.000000 \r\n").collect();
        assert_eq!(times, vec![Ok(42)]);
    }

    #[test]
    fn test_partial_trailing_line() {
        let contents = "out_time=00:00:05.005000\nprogress=continue\nout_time=00:0";
        let times: Vec<_> = out_times(contents).collect();
        assert_eq!(times[0], Ok(5));
        assert!(times[1].is_err());
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(out_times("").count(), 0);
    }
}
