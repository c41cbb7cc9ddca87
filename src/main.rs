//! Headless Mahjong Solitaire runner (default binary).
//!
//! Reads line-delimited JSON commands from stdin and writes acks, errors and
//! observations to stdout. Logs go to stderr so they never mix with protocol output.

use std::io::{self, BufReader};

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::prelude::*;

use mahjong_solitaire::adapter::{run_host, AdapterConfig, Session};

fn main() -> Result<()> {
    let config = AdapterConfig::from_env();

    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    tracing::info!(
        difficulty = config.difficulty.as_str(),
        seed = config.seed,
        observe = config.stream_observations,
        auto_tick = config.auto_tick,
        "starting session"
    );

    let mut session = Session::new(config);
    run_host(&mut session, BufReader::new(io::stdin()), io::stdout().lock())
}
