use std::path::PathBuf;

use clap::ValueHint;
use d3d::ImportConfig;

/// How log events are rendered on stderr.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    /// One JSON object per event, fields flattened to the top level
    Json,
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,d3d=info,d3d2obj=info",
        env = "D3D2OBJ_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
    /// Write one OBJ object per primitive instead of merging everything into one
    #[arg(short, long)]
    pub separate: bool,
    /// Split quads and larger faces into triangles
    #[arg(short, long)]
    pub triangulate: bool,
    /// Directory to write OBJ files to; defaults to each input's own directory
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,
    /// Print a one-line summary of each converted file to stdout
    #[arg(long)]
    pub summary: bool,
    /// D3D models to convert (`.d3d`, `.gmmod`, `.txt`)
    #[arg(num_args = 1.., required = true, value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    pub fn import_config(&self) -> ImportConfig {
        ImportConfig {
            merge_primitives: !self.separate,
            triangulate: self.triangulate,
        }
    }
}

/// Install the stderr subscriber, stamping events with local wall-clock time to the millisecond.
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let (offset, offset_err) = match time::UtcOffset::current_local_offset() {
        Ok(offset) => (offset, None),
        Err(e) => (time::UtcOffset::UTC, Some(e)),
    };
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            offset,
            time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:3]"),
        ))
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().flatten_event(true).init(),
    }
    // only reportable once a subscriber exists
    if let Some(e) = offset_err {
        tracing::warn!("couldn't get local time offset, logging in UTC: {e}");
    }
}
