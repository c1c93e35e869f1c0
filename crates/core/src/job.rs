//! Runs one transcode from probe to finished output.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::probe::{FfprobeProber, ProbeError, Prober};
use crate::progress::{NoopSink, ProgressMonitor, ProgressSink};
use crate::selection::{select_tracks, LanguageTargets, SelectionError, TrackSelection};
use crate::transcode::{FfmpegTranscoder, TranscodeError, TranscodeRequest, Transcoder};

/// Prefix of the temporary progress file name.
pub const PROGRESS_FILE_PREFIX: &str = "ffmpeg_progress_";

/// Errors that abort a job. None of them are retried.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    #[error("Error creating temp file: {0}")]
    TempFile(#[source] std::io::Error),
}

/// Input and output of one transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl TranscodeJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Result of a successful job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub selection: TrackSelection,
    pub output: PathBuf,
    pub elapsed: Duration,
}

/// Sequences probe, selection and transcode for a job.
pub struct JobRunner<P: Prober, T: Transcoder> {
    config: Config,
    targets: LanguageTargets,
    prober: P,
    transcoder: T,
    sink: Arc<dyn ProgressSink>,
}

impl JobRunner<FfprobeProber, FfmpegTranscoder> {
    /// Creates a runner backed by the configured ffprobe and ffmpeg binaries.
    pub fn from_config(config: Config) -> Self {
        let prober = FfprobeProber::from_config(&config.tools);
        let transcoder = FfmpegTranscoder::from_config(&config.tools);
        Self::new(config, prober, transcoder)
    }
}

impl<P: Prober, T: Transcoder> JobRunner<P, T> {
    pub fn new(config: Config, prober: P, transcoder: T) -> Self {
        Self {
            config,
            targets: LanguageTargets::default(),
            prober,
            transcoder,
            sink: Arc::new(NoopSink),
        }
    }

    /// Sets the languages to select.
    pub fn with_targets(mut self, targets: LanguageTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Sets where progress updates go.
    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs the job.
    ///
    /// Stops at the first error. The progress file is removed on every path
    /// out of this function.
    pub async fn run(&self, job: &TranscodeJob) -> Result<JobOutcome, JobError> {
        let start = Instant::now();

        info!("Getting stream list via {}", self.prober.name());
        let probe = self.prober.probe(&job.input).await?;
        debug!(streams = probe.streams.len(), "Probe complete");

        info!(
            "Searching for audio track ({}) and subtitle track ({})",
            self.targets.audio, self.targets.subtitle
        );
        let selection = select_tracks(&probe, &self.targets)?;

        self.transcoder.validate().await?;

        let progress_file = self.create_progress_file()?;
        let request = TranscodeRequest::new(
            &job.input,
            &job.output,
            selection.audio_index,
            progress_file.path(),
        );

        info!("Processing video with the selected audio track and hardcoded subtitles");
        info!("Output file path: {}", job.output.display());

        let handle = self.transcoder.spawn(&request).await?;

        self.sink.start(selection.total_duration_secs);
        let monitor = ProgressMonitor::new(
            progress_file.path(),
            self.config.progress.poll_interval(),
            Arc::clone(&self.sink),
        )
        .spawn();

        let result = handle.wait().await;
        monitor.stop().await;

        match result {
            Ok(()) => self.sink.finish("Done"),
            Err(e) => {
                self.sink.finish("Failed");
                return Err(e.into());
            }
        }

        Ok(JobOutcome {
            selection,
            output: job.output.clone(),
            elapsed: start.elapsed(),
        })
    }

    fn create_progress_file(&self) -> Result<NamedTempFile, JobError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PROGRESS_FILE_PREFIX).suffix(".txt");

        let file = match &self.config.progress.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(JobError::TempFile)?;

        debug!(path = %file.path().display(), "Created progress file");
        Ok(file)
    }
}
