//! Shared time base for all tick-driven subsystems.
//!
//! Every stateful component measures its own elapsed time against a
//! caller-supplied monotonic [`Instant`]; nothing in this crate reads a
//! clock itself. Differences use wrapping tick arithmetic so a wrapped
//! counter never yields a huge bogus delta.

use embassy_time::{Duration, Instant};

/// Upper bound on the delta a single tick may observe.
///
/// Bounds how far an animation or relay expiry can jump after a scheduler
/// stall (e.g. a blocking sensor read between iterations).
pub const MAX_TICK_DELTA: Duration = Duration::from_millis(250);

/// Wraparound-tolerant elapsed time between two instants.
///
/// Returns zero if `now` reads as earlier than `last`.
#[inline]
pub fn elapsed(last: Instant, now: Instant) -> Duration {
    let diff = now.as_ticks().wrapping_sub(last.as_ticks());
    #[allow(clippy::cast_possible_wrap)]
    let signed = diff as i64;
    if signed < 0 {
        Duration::from_ticks(0)
    } else {
        Duration::from_ticks(diff)
    }
}

/// Elapsed time since `last`, clamped to [`MAX_TICK_DELTA`].
#[inline]
pub fn step_since(last: Instant, now: Instant) -> Duration {
    elapsed(last, now).min(MAX_TICK_DELTA)
}

/// Clamp an externally supplied delta the same way [`step_since`] does.
#[inline]
pub fn clamp_step(dt: Duration) -> Duration {
    dt.min(MAX_TICK_DELTA)
}

/// Wraparound-tolerant deadline check: has `deadline` passed at `now`?
#[inline]
pub fn is_due(deadline: Instant, now: Instant) -> bool {
    let diff = now.as_ticks().wrapping_sub(deadline.as_ticks());
    #[allow(clippy::cast_possible_wrap)]
    let signed = diff as i64;
    signed >= 0
}

/// Progress through `duration` after `elapsed`, as 0-255.
///
/// Integer-only; saturates at 255 once the duration is consumed. A zero
/// duration reports 255 (already complete) so degenerate segments resolve
/// immediately instead of dividing by zero.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_millis() == 0 {
        return 255;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }

    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}
