//! Background polling of the progress file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{out_times, ProgressSink};

/// How often the progress file is re-read.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polls an ffmpeg progress file and forwards elapsed time to a sink.
pub struct ProgressMonitor {
    path: PathBuf,
    interval: Duration,
    sink: Arc<dyn ProgressSink>,
}

impl ProgressMonitor {
    pub fn new(path: impl Into<PathBuf>, interval: Duration, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            path: path.into(),
            interval,
            sink,
        }
    }

    /// Reads the whole file once and applies every `out_time` in order.
    ///
    /// Positions are absolute, so a smaller later value moves the display
    /// back. Returns the number of positions applied; fails only if the file
    /// cannot be opened.
    pub async fn poll_once(&self) -> std::io::Result<usize> {
        let mut file = tokio::fs::File::open(&self.path).await?;

        let mut bytes = Vec::new();
        if let Err(e) = file.read_to_end(&mut bytes).await {
            debug!("Error reading progress file: {}", e);
        }
        let contents = String::from_utf8_lossy(&bytes);

        let mut applied = 0;
        for time in out_times(&contents) {
            match time {
                Ok(secs) => {
                    self.sink.set_position(secs);
                    applied += 1;
                }
                Err(e) => debug!("Error parsing time: {}", e),
            }
        }

        Ok(applied)
    }

    /// Starts polling on a background task.
    ///
    /// The loop ends when [`MonitorHandle::stop`] is called, when the handle
    /// is dropped, or for good if the file cannot be opened. A failed open is
    /// logged and never reaches the transcode.
    pub fn spawn(self) -> MonitorHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

        let task = tokio::spawn(async move {
            debug!(path = %self.path.display(), "Progress monitor started");
            loop {
                if let Err(e) = self.poll_once().await {
                    warn!("Error opening progress file: {}", e);
                    return None;
                }

                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!("Progress monitor received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(self.interval) => {}
                }
            }
            debug!("Progress monitor stopped");
            Some(self)
        });

        MonitorHandle { shutdown_tx, task }
    }
}

/// Handle to a running [`ProgressMonitor`].
pub struct MonitorHandle {
    shutdown_tx: broadcast::Sender<()>,
    /// Yields the monitor back unless the loop gave up on the file.
    task: JoinHandle<Option<ProgressMonitor>>,
}

impl MonitorHandle {
    /// Whether the polling loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the loop and polls one last time so the final `out_time`
    /// written before ffmpeg exited is shown. No final poll happens if the
    /// loop already stopped because the file could not be opened.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        match self.task.await {
            Ok(Some(monitor)) => {
                if let Err(e) = monitor.poll_once().await {
                    debug!("Final progress poll failed: {}", e);
                }
            }
            Ok(None) => debug!("Progress monitor had already given up"),
            Err(e) => warn!("Progress monitor task failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TICK: Duration = Duration::from_millis(10);

    fn write_progress(file: &mut NamedTempFile, contents: &str) {
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
    }

    #[tokio::test]
    async fn test_poll_once_applies_every_out_time() {
        let mut file = NamedTempFile::new().unwrap();
        write_progress(
            &mut file,
            "out_time=N/A\nprogress=continue\nout_time=00:00:05.000000\nprogress=continue\nout_time=00:01:10.000000\n",
        );

        let sink = Arc::new(RecordingSink::new());
        let monitor = ProgressMonitor::new(file.path(), TICK, sink.clone());

        let applied = monitor.poll_once().await.unwrap();
        assert_eq!(applied, 2);
        assert_eq!(sink.positions(), vec![5, 70]);
    }

    #[tokio::test]
    async fn test_poll_once_rereads_whole_file() {
        let mut file = NamedTempFile::new().unwrap();
        write_progress(&mut file, "out_time=00:00:01.000000\n");

        let sink = Arc::new(RecordingSink::new());
        let monitor = ProgressMonitor::new(file.path(), TICK, sink.clone());
        monitor.poll_once().await.unwrap();

        write_progress(&mut file, "out_time=00:00:02.000000\n");
        monitor.poll_once().await.unwrap();

        assert_eq!(sink.positions(), vec![1, 1, 2]);
    }

    #[tokio::test]
    async fn test_position_can_move_backwards() {
        let mut file = NamedTempFile::new().unwrap();
        write_progress(&mut file, "out_time=00:00:30.000000\nout_time=00:00:10.000000\n");

        let sink = Arc::new(RecordingSink::new());
        let monitor = ProgressMonitor::new(file.path(), TICK, sink.clone());
        monitor.poll_once().await.unwrap();

        assert_eq!(sink.last_position(), Some(10));
    }

    #[tokio::test]
    async fn test_poll_once_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(RecordingSink::new());
        let monitor = ProgressMonitor::new(dir.path().join("gone.txt"), TICK, sink.clone());

        assert!(monitor.poll_once().await.is_err());
        assert!(sink.positions().is_empty());
    }

    #[tokio::test]
    async fn test_spawned_monitor_follows_file() {
        let mut file = NamedTempFile::new().unwrap();
        let sink = Arc::new(RecordingSink::new());
        let handle = ProgressMonitor::new(file.path(), TICK, sink.clone()).spawn();

        write_progress(&mut file, "out_time=00:00:03.000000\n");

        let mut seen = false;
        for _ in 0..200 {
            if sink.last_position() == Some(3) {
                seen = true;
                break;
            }
            tokio::time::sleep(TICK).await;
        }
        assert!(seen, "monitor never picked up the progress line");

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_monitor_exits_when_file_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(RecordingSink::new());
        let handle = ProgressMonitor::new(dir.path().join("gone.txt"), TICK, sink.clone()).spawn();

        for _ in 0..200 {
            if handle.is_finished() {
                break;
            }
            tokio::time::sleep(TICK).await;
        }
        assert!(handle.is_finished());

        handle.stop().await;
        assert!(sink.positions().is_empty());
    }

    #[tokio::test]
    async fn test_no_updates_after_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.txt");
        let sink = Arc::new(RecordingSink::new());
        let handle = ProgressMonitor::new(&path, TICK, sink.clone()).spawn();

        for _ in 0..200 {
            if handle.is_finished() {
                break;
            }
            tokio::time::sleep(TICK).await;
        }
        assert!(handle.is_finished());

        // The file shows up after the monitor gave up on it.
        std::fs::write(&path, "out_time=00:00:42.000000\nprogress=end\n").unwrap();
        handle.stop().await;

        assert!(sink.positions().is_empty());
    }

    #[tokio::test]
    async fn test_stop_polls_one_last_time() {
        let mut file = NamedTempFile::new().unwrap();
        let sink = Arc::new(RecordingSink::new());
        let handle =
            ProgressMonitor::new(file.path(), Duration::from_secs(3600), sink.clone()).spawn();

        write_progress(&mut file, "out_time=00:23:40.000000\nprogress=end\n");
        handle.stop().await;

        assert_eq!(sink.last_position(), Some(1420));
    }
}
