use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long options that may also be written with a single dash (`-path`).
const LONG_OPTIONS: &[&str] = &["path", "output", "config", "help", "version"];

#[derive(Debug, Parser)]
#[command(name = "hardsub")]
#[command(
    author,
    version,
    about = "Transcode a video keeping the Japanese audio and burning in French subtitles"
)]
pub struct Cli {
    /// Path to the input video file
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub path: String,

    /// Output filename
    #[arg(long, default_value = "output.mp4")]
    pub output: PathBuf,

    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses the process arguments, accepting `-path` as well as `--path`.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn input(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

/// Rewrites single-dash long options (`-path x`, `-output=y`) to the
/// double-dash form clap expects. Arguments after a bare `--` are untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(s) if s.starts_with('-') && !s.starts_with("--") => {
                let name = s[1..].split('=').next().unwrap_or_default();
                LONG_OPTIONS
                    .contains(&name)
                    .then(|| OsString::from(format!("-{}", s)))
            }
            _ => None,
        };

        out.push(rewritten.unwrap_or(arg));
    }

    out
}
