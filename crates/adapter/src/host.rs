//! Line host: reads commands, writes replies, drives the clock

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::session::Session;

/// Clock period for auto-tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Serve `input` until it closes
///
/// Input is read on its own thread so the clock keeps running while the client is
/// quiet. Replies are flushed after every command. Lines that are not valid UTF-8 get an
/// `invalid_json` error; only real read failures end the loop.
pub fn run_host<R, W>(session: &mut Session, input: R, mut output: W) -> anyhow::Result<()>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in input.lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    info!(
        difficulty = session.game().difficulty().as_str(),
        auto_tick = session.config().auto_tick,
        "host started"
    );

    let mut last_tick = Instant::now();
    loop {
        let wait = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        match rx.recv_timeout(wait) {
            Ok(line) => {
                let replies = match line {
                    Ok(line) => session.handle_line(&line),
                    Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                        warn!(error = %e, "undecodable inbound line");
                        vec![session.unreadable_line(&e.to_string())]
                    }
                    Err(e) => return Err(e).context("reading command line"),
                };
                for msg in replies {
                    writeln!(output, "{}", msg.to_line()?)?;
                }
                output.flush()?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("input closed");
                return Ok(());
            }
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            last_tick = Instant::now();
            if session.config().auto_tick && session.tick() {
                debug!(
                    seconds = session.game().time_elapsed_seconds(),
                    "clock advanced"
                );
            }
        }
    }
}
