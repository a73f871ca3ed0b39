//! Replay recorded per-frame detections through a counting session.
//!
//! Input is JSON lines, one object per processed frame:
//!
//! ```text
//! {"frame": 3, "detections": [[412, 80, 96, 72], [40, 300, 64, 60]]}
//! {"frame": 4}
//! ```
//!
//! Boxes are `[x, y, width, height]`. A line without `detections` is an
//! aging-only frame.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crosscount_rs::integration::SizeFilter;
use crosscount_rs::{CountingSession, Detection, FrameSize, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "crosscount-replay", about = "Count line crossings in recorded detections")]
struct Args {
    /// JSON-lines detection log; `-` reads stdin
    #[arg(value_name = "PATH")]
    input: PathBuf,
    #[arg(long)]
    width: u32,
    #[arg(long)]
    height: u32,
    /// Session configuration as JSON; missing fields take their defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 50)]
    min_width: i32,
    #[arg(long, default_value_t = 50)]
    min_height: i32,
    /// Print every count event as a JSON line on stdout
    #[arg(long)]
    events: bool,
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    frame: u64,
    #[serde(default)]
    detections: Option<Vec<[i32; 4]>>,
}

fn load_config(path: Option<&PathBuf>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SessionConfig::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn open_input(path: &PathBuf) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let mut session = CountingSession::new(config, FrameSize::new(args.width, args.height))
        .context("invalid session configuration")?;
    let filter = SizeFilter::new(args.min_width, args.min_height);

    let reader = open_input(&args.input)?;
    let mut stdout = io::stdout().lock();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("reading detection log")?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = serde_json::from_str(&line)
            .with_context(|| format!("line {}: malformed frame record", lineno + 1))?;

        let detection_pass = record.detections.is_some();
        let detections = record
            .detections
            .unwrap_or_default()
            .into_iter()
            .map(|[x, y, w, h]| Detection::new(x, y, w, h))
            .collect();
        let detections = filter.apply(detections);

        match session.process_frame(&detections, record.frame, detection_pass) {
            Ok(result) if args.events => {
                for event in &result.events {
                    serde_json::to_writer(&mut stdout, event)?;
                    writeln!(stdout)?;
                }
            }
            Ok(_) => {}
            Err(err) => warn!(line = lineno + 1, %err, "frame skipped"),
        }
    }

    let total = session.finish();
    info!(total, "replay finished");
    if !args.events {
        writeln!(stdout, "{total}")?;
    }
    Ok(())
}
