//! touchy-replay
//!
//! Feeds a recorded input trace through a gesture session bound to an
//! in-memory surface and logs every finger, hand and cohort event.
//!
//! Usage:
//!     touchy-replay trace.json
//!     touchy-replay --config session.json --verbose trace.json
//!
//! A trace is a JSON array of records:
//!
//! ```text
//! [
//!   { "touch": { "phase": "start", "changed": [{ "identifier": 1, "pageX": 10, "pageY": 20 }],
//!                "touches": [{ "identifier": 1, "pageX": 10, "pageY": 20 }], "timestamp": 0 } },
//!   { "mouse": { "phase": "down", "pageX": 4, "pageY": 4, "timestamp": 16 } }
//! ]
//! ```

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use touchy::input::{InputRecord, NodeId, VirtualSurface};
use touchy::model::constants::MAX_KEYED_FINGERS;
use touchy::{Finger, Hand, Lifecycle, Session, SessionConfig, SessionOptions, TouchyError};

/// Replay a recorded touch/mouse trace through a gesture session
#[derive(Parser, Debug)]
#[command(name = "touchy-replay")]
#[command(version)]
#[command(about = "Replay input traces through a touchy session", long_about = None)]
struct Cli {
    /// JSON trace file (array of touch/mouse records)
    trace: PathBuf,

    /// Session config file (handleMouse, plugins)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum ReplayError {
    #[error("Failed to read trace {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid trace: {0}")]
    Trace(serde_json::Error),

    #[error(transparent)]
    Session(#[from] TouchyError),
}

/// Event counts gathered while replaying.
#[derive(Debug, Default)]
struct Summary {
    fingers: Cell<usize>,
    cohorts: Cell<usize>,
    largest_cohort: Cell<usize>,
}

impl Summary {
    fn finger_down(&self) {
        self.fingers.set(self.fingers.get() + 1);
    }

    fn cohort_started(&self, size: usize) {
        self.cohorts.set(self.cohorts.get() + 1);
        self.largest_cohort.set(self.largest_cohort.get().max(size));
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(&cli) {
        Ok((records, summary)) => {
            println!(
                "{} records, {} fingers, {} cohorts, largest cohort {}",
                records,
                summary.fingers.get(),
                summary.cohorts.get(),
                summary.largest_cohort.get()
            );
        }
        Err(e) => {
            eprintln!("touchy-replay error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<(usize, Rc<Summary>), ReplayError> {
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let records = load_trace(&cli.trace)?;
    debug!(records = records.len(), "Trace loaded");

    let summary = Rc::new(Summary::default());
    let mut session = Session::new(
        VirtualSurface::new(NodeId(1)),
        logging_options(config, &summary),
    )?;
    log_hand("main", session.main_hand());

    replay(&mut session, &records)?;
    session.stop();
    Ok((records.len(), summary))
}

fn load_trace(path: &Path) -> Result<Vec<InputRecord>, ReplayError> {
    let contents = fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&contents)
}

fn parse_trace(json: &str) -> Result<Vec<InputRecord>, ReplayError> {
    serde_json::from_str(json).map_err(ReplayError::Trace)
}

fn replay(session: &mut Session<VirtualSurface>, records: &[InputRecord]) -> touchy::Result<()> {
    for record in records {
        match record {
            InputRecord::Touch(event) => session.handle_touch(event)?,
            InputRecord::Mouse(event) => session.handle_mouse(event)?,
        }
    }
    Ok(())
}

/// Options that count and log everything the session produces.
fn logging_options(config: SessionConfig, summary: &Rc<Summary>) -> SessionOptions {
    let any_summary = Rc::clone(summary);
    let mut options = SessionOptions::from_config(config).any(move |_, fingers| {
        for finger in fingers {
            any_summary.finger_down();
            log_finger(finger);
        }
        Ok(())
    });

    for count in 1..=MAX_KEYED_FINGERS {
        let summary = Rc::clone(summary);
        options = options.on_count(count, move |cohort, _| {
            summary.cohort_started(cohort.len());
            log_hand("cohort", cohort);
            Ok(())
        });
    }
    options
}

fn log_finger(finger: &Finger) {
    for stage in Lifecycle::ALL {
        finger.on(stage, move |f, p| {
            info!(finger = %f.id(), x = p.x, y = p.y, time = p.time, "finger {}", stage);
            Ok(())
        });
    }
}

fn log_hand(tag: &'static str, hand: &Hand) {
    for stage in Lifecycle::ALL {
        hand.on(stage, move |h, points| {
            let ids: Vec<String> = points.iter().map(|p| p.id.to_string()).collect();
            info!(size = h.len(), points = %ids.join(","), "{} {}", tag, stage);
            Ok(())
        });
    }
}
