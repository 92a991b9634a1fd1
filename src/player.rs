//! Playback state machine for expression scheduling.
//!
//! The player owns which expression is current and how far through its loop
//! playback is. Pending requests are consulted only when the frame index
//! wraps back to zero, so an expression always completes a full animation
//! cycle before it is interrupted or reverted. When the queue is empty at a
//! loop boundary and a non-default expression is playing, playback reverts
//! to the default (idle) expression.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::inbox::Inbox;
use crate::library::{ExpressionLibrary, Frame};

/// Expression playback state machine.
///
/// Owned exclusively by the render thread; the inbox receiver is the only
/// connection to the outside world.
#[derive(Debug)]
pub struct ExpressionPlayer {
    library: ExpressionLibrary,
    inbox: Inbox,
    default_name: String,
    frame_delay: Duration,
    current_name: String,
    frame_index: usize,
    last_advance: Instant,
}

impl ExpressionPlayer {
    /// Create a player idling on the default expression.
    ///
    /// If `requested_default` is not in the library, the lexicographically
    /// first loaded expression becomes the default instead.
    pub fn new(
        library: ExpressionLibrary,
        inbox: Inbox,
        requested_default: &str,
        frame_delay: Duration,
    ) -> Self {
        let default_name = library.resolve_default(requested_default).to_string();
        Self {
            current_name: default_name.clone(),
            default_name,
            library,
            inbox,
            frame_delay,
            frame_index: 0,
            last_advance: Instant::now(),
        }
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn library(&self) -> &ExpressionLibrary {
        &self.library
    }

    /// Frame to present right now.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.library
            .get(&self.current_name)
            .and_then(|expression| expression.frame(self.frame_index))
    }

    /// Switch to `name` immediately, restarting it at frame zero.
    ///
    /// Unknown names are a warning-level no-op. Requesting the expression
    /// that is already playing restarts it from the beginning.
    pub fn play(&mut self, name: &str) {
        self.play_at(name, Instant::now());
    }

    fn play_at(&mut self, name: &str, now: Instant) {
        if !self.library.contains(name) {
            warn!(expression = name, "Expression not found");
            return;
        }
        self.current_name = name.to_string();
        self.frame_index = 0;
        self.last_advance = now;
    }

    /// Advance playback. Called once per render tick, typically much more
    /// often than the animation's own frame rate.
    pub fn tick(&mut self, now: Instant) {
        let frame_count = match self.library.get(&self.current_name) {
            Some(expression) => expression.frame_count(),
            None => return,
        };

        if now.duration_since(self.last_advance) < self.frame_delay {
            return;
        }

        self.frame_index = (self.frame_index + 1) % frame_count;
        self.last_advance = now;

        // Loop boundary: the only moment new requests are consulted.
        if self.frame_index == 0 {
            self.check_inbox(now);
        }
    }

    fn check_inbox(&mut self, now: Instant) {
        if let Some(next) = self.drain_inbox() {
            self.play_at(&next, now);
        } else if self.current_name != self.default_name {
            let default = self.default_name.clone();
            self.play_at(&default, now);
        }
    }

    /// Flush the whole queue, keeping the last valid name.
    ///
    /// Later requests override earlier ones within the same drain, so
    /// buffered rapid-fire requests collapse to the newest intent instead
    /// of queueing up a series of switches.
    fn drain_inbox(&mut self) -> Option<String> {
        let mut candidate = None;
        while let Some(raw) = self.inbox.try_pop() {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            if self.library.contains(name) {
                candidate = Some(name.to_string());
            } else {
                warn!(expression = name, "Unknown expression ignored");
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbox::{inbox, InboxSender};
    use crate::library::{Expression, Frame};

    const DELAY: Duration = Duration::from_millis(80);

    fn frame() -> Frame {
        Frame::new(2, 2, vec![0u8; 16])
    }

    fn library(entries: &[(&str, usize)]) -> ExpressionLibrary {
        ExpressionLibrary::from_expressions(entries.iter().map(|(name, count)| {
            Expression::new(*name, (0..*count).map(|_| frame()).collect())
        }))
        .unwrap()
    }

    fn player(entries: &[(&str, usize)], default: &str) -> (ExpressionPlayer, InboxSender) {
        let (tx, rx) = inbox();
        (ExpressionPlayer::new(library(entries), rx, default, DELAY), tx)
    }

    /// Advance `player` through `n` frame steps, one delay apart, starting
    /// after `base`. Returns the instant of the last step.
    fn step(player: &mut ExpressionPlayer, base: Instant, n: u32) -> Instant {
        let mut now = base;
        for _ in 0..n {
            now += DELAY;
            player.tick(now);
        }
        now
    }

    #[test]
    fn test_missing_default_resolves_lexicographically() {
        let (player, _tx) = player(&[("blank", 1), ("happy", 3)], "missing");
        assert_eq!(player.default_name(), "blank");
        assert_eq!(player.current_name(), "blank");
    }

    #[test]
    fn test_tick_before_delay_is_noop() {
        let (mut player, _tx) = player(&[("happy", 3)], "happy");
        player.tick(Instant::now() + DELAY / 2);
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_frames_advance_and_wrap() {
        let (mut player, _tx) = player(&[("happy", 3)], "happy");
        let base = Instant::now();
        step(&mut player, base, 1);
        assert_eq!(player.frame_index(), 1);
        step(&mut player, base + DELAY, 1);
        assert_eq!(player.frame_index(), 2);
        step(&mut player, base + 2 * DELAY, 1);
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_full_cycle_before_switch() {
        let (mut player, tx) = player(&[("happy", 3), ("sad", 2)], "happy");
        let base = Instant::now();

        // Mid-cycle request must not take effect until the wrap to zero.
        let now = step(&mut player, base, 1);
        assert_eq!(player.frame_index(), 1);
        tx.push("sad");

        let now = step(&mut player, now, 1);
        assert_eq!(player.current_name(), "happy");
        assert_eq!(player.frame_index(), 2);

        step(&mut player, now, 1);
        assert_eq!(player.current_name(), "sad");
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_latest_valid_request_wins() {
        let (mut player, tx) = player(&[("angry", 1), ("happy", 3), ("sad", 2)], "happy");
        tx.push("sad");
        tx.push("angry");
        tx.push("bogus");
        tx.push("happy");

        // 3 steps complete one "happy" cycle and trigger the drain.
        step(&mut player, Instant::now(), 3);
        assert_eq!(player.current_name(), "happy");
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_blank_requests_skipped() {
        let (mut player, tx) = player(&[("blank", 1), ("sad", 2)], "blank");
        tx.push("   ");
        tx.push("");
        tx.push("  sad  ");

        step(&mut player, Instant::now(), 1);
        assert_eq!(player.current_name(), "sad");
    }

    #[test]
    fn test_auto_revert_to_default() {
        let (mut player, _tx) = player(&[("blank", 1), ("happy", 3)], "blank");
        player.play("happy");
        assert_eq!(player.current_name(), "happy");

        // One full cycle with nothing queued reverts to the default.
        step(&mut player, Instant::now(), 3);
        assert_eq!(player.current_name(), "blank");
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_default_stays_put_when_queue_empty() {
        let (mut player, _tx) = player(&[("blank", 2)], "blank");
        step(&mut player, Instant::now(), 2);
        assert_eq!(player.current_name(), "blank");
    }

    #[test]
    fn test_play_unknown_is_noop() {
        let (mut player, _tx) = player(&[("blank", 1), ("happy", 3)], "happy");
        let base = Instant::now();
        step(&mut player, base, 1);
        assert_eq!(player.frame_index(), 1);

        player.play("nonexistent");
        assert_eq!(player.current_name(), "happy");
        assert_eq!(player.frame_index(), 1);
    }

    #[test]
    fn test_replaying_current_restarts_at_frame_zero() {
        let (mut player, _tx) = player(&[("happy", 3)], "happy");
        step(&mut player, Instant::now(), 1);
        assert_eq!(player.frame_index(), 1);

        player.play("happy");
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_unknown_request_does_not_block_later_valid_one() {
        let (mut player, tx) = player(&[("blank", 1), ("sad", 2)], "blank");
        tx.push("bogus");
        tx.push("sad");

        step(&mut player, Instant::now(), 1);
        assert_eq!(player.current_name(), "sad");
    }

    #[test]
    fn test_current_frame_always_available() {
        let (mut player, _tx) = player(&[("blank", 1), ("happy", 3)], "happy");
        assert!(player.current_frame().is_some());
        step(&mut player, Instant::now(), 5);
        assert!(player.current_frame().is_some());
    }
}
