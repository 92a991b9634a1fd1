//! Render/drive loop.
//!
//! Runs at a fixed external cadence that is independent of the player's own
//! frame-delay timer. Exit events are polled every cadence tick, so
//! shutdown latency is bounded by the cadence period rather than the
//! (typically coarser) animation frame delay.

use std::time::{Duration, Instant};

use crate::display::Display;
use crate::error::Result;
use crate::player::ExpressionPlayer;

/// Drive loop cadence (iterations per second).
const TICKS_PER_SECOND: u32 = 60;

/// Run the drive loop until an exit is requested.
pub fn run(player: &mut ExpressionPlayer, display: &mut Display) -> Result<()> {
    let tick_interval = Duration::from_secs(1) / TICKS_PER_SECOND;

    loop {
        let tick_start = Instant::now();

        if display.poll_quit() {
            tracing::info!("Exit requested");
            return Ok(());
        }

        player.tick(Instant::now());
        if let Some(frame) = player.current_frame() {
            display.present(frame)?;
        }

        let elapsed = tick_start.elapsed();
        if elapsed < tick_interval {
            std::thread::sleep(tick_interval - elapsed);
        }
    }
}
