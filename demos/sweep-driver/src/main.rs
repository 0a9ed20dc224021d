//! # Sweep Driver Demo
//!
//! A thin driver around the dispatch engine: it reads the building shape,
//! queues a few pickups, and calls `step()` on a timer.
//! The engine itself never sees a clock.
//!
//! ```text
//! RUST_LOG=lift_dispatch=debug cargo run -p sweep-driver-demo -- \
//!     --floors 10 --elevators 2 --redirect 0:9 --pickup 7:2 --pickup 5:0
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use lift_dispatch::{DispatchConfig, DispatchEngine, ElevatorId, Floor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "sweep-driver", about = "Drive a simulated elevator bank")]
struct Args {
    /// JSON file holding a `DispatchConfig`; overrides --floors/--elevators
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    floors: usize,

    #[arg(long, default_value_t = 1)]
    elevators: usize,

    /// Number of ticks to run
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Pickup as FROM:TO, may be repeated
    #[arg(long = "pickup")]
    pickups: Vec<Pair>,

    /// Initial destination as ELEVATOR:FLOOR, may be repeated
    #[arg(long = "redirect")]
    redirects: Vec<Pair>,

    /// Print a JSON snapshot after every tick
    #[arg(long)]
    json: bool,
}

/// `A:B` on the command line.
#[derive(Debug, Clone, Copy)]
struct Pair(u32, u32);

impl FromStr for Pair {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected A:B, got {s:?}"))?;
        Ok(Pair(a.trim().parse()?, b.trim().parse()?))
    }
}

fn load_config(args: &Args) -> Result<DispatchConfig> {
    match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(DispatchConfig::new(args.floors, args.elevators)),
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let engine = DispatchEngine::from_config(&config).context("invalid building")?;

    for Pair(elevator, floor) in &args.redirects {
        engine
            .update(*elevator as ElevatorId, *floor as Floor)
            .with_context(|| format!("redirecting elevator {elevator}"))?;
    }

    for Pair(from, to) in &args.pickups {
        // A bad pickup is the caller's problem, not a reason to stop the run.
        match engine.pickup(*from, *to) {
            Ok(id) => info!(%id, from, to, "pickup accepted"),
            Err(error) => warn!(%error, from, to, "pickup rejected"),
        }
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(args.tick_ms));
    for tick in 1..=args.steps {
        ticker.tick().await;
        let events = engine.step_with_events();

        if args.json {
            println!("{}", serde_json::to_string(&engine.snapshot())?);
            continue;
        }

        let line: Vec<String> = engine
            .status()
            .iter()
            .map(|s| format!("#{} {}->{}", s.id, s.current_floor, s.destination_floor))
            .collect();
        info!(tick, events = events.len(), "{}", line.join("  "));
    }

    let snapshot = engine.snapshot();
    info!(
        waiting = snapshot.waiting_count(),
        riding = snapshot.riding_count(),
        "run complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_tick_interval() {
        let err = Args::try_parse_from(["sweep-driver", "--tick-ms", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_pickups_and_redirects() {
        let args = Args::try_parse_from([
            "sweep-driver",
            "--tick-ms",
            "1",
            "--pickup",
            "7:2",
            "--redirect",
            "0:9",
        ])
        .unwrap();

        assert_eq!(args.tick_ms, 1);
        assert_eq!((args.pickups[0].0, args.pickups[0].1), (7, 2));
        assert_eq!((args.redirects[0].0, args.redirects[0].1), (0, 9));
    }
}
