//! Timed, fail-safe relay bank.
//!
//! Each channel wraps one digital output behind a polarity mapping and
//! carries two optional deadlines: a pulse (bounded, self-terminating
//! "on") and a latch (indefinite or timed "on", refreshable via
//! keep-alive). At most one of the two is meaningful at a time; starting
//! either clears the other. [`RelayBank::tick`] is the only mechanism
//! that turns a channel off automatically, so the driving loop must call
//! it well within the shortest configured duration.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;

use crate::timebase;

const MIN_PULSE: Duration = Duration::from_millis(1);

/// Mapping between a channel's logical state and its physical level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

/// Outcome of a keep-alive request on a valid channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepAlive {
    /// The latch deadline was pushed out.
    Refreshed,
    /// The channel runs in untimed mode; there was nothing to refresh.
    Untimed,
}

/// Fixed-size array of relay channels mapped 1:1 to digital outputs.
pub struct RelayBank<P: OutputPin, const N: usize> {
    outputs: [P; N],
    polarity: [Polarity; N],
    pulse_until: [Option<Instant>; N],
    latch_until: [Option<Instant>; N],
    level: [bool; N],
    default_timeout: Option<Duration>,
}

impl<P: OutputPin, const N: usize> RelayBank<P, N> {
    /// Build the bank and drive every channel to logical off.
    pub fn new(outputs: [P; N], polarity: [Polarity; N], default_timeout: Option<Duration>) -> Self {
        let mut bank = Self {
            outputs,
            polarity,
            pulse_until: [None; N],
            latch_until: [None; N],
            level: [false; N],
            default_timeout,
        };
        bank.all_off();
        bank
    }

    pub const fn channel_count(&self) -> usize {
        N
    }

    /// Logical on/off state of a channel; `None` if out of range.
    pub fn is_on(&self, ch: usize) -> Option<bool> {
        self.level.get(ch).copied()
    }

    fn drive(&mut self, ch: usize, logical_on: bool) {
        self.level[ch] = logical_on;
        let physical_high = match self.polarity[ch] {
            Polarity::ActiveHigh => logical_on,
            Polarity::ActiveLow => !logical_on,
        };
        // The hardware boundary is assumed non-failing at this layer.
        let _ = self.outputs[ch].set_state(physical_high.into());
    }

    fn resolve_timeout(&self, timeout: Option<Duration>) -> Option<Duration> {
        timeout.or(self.default_timeout)
    }

    /// Latch a channel on.
    ///
    /// Timeout resolution order: explicit argument, then the bank default,
    /// then none (untimed, indefinite on). Any pending pulse deadline is
    /// cleared. Returns false for an out-of-range channel.
    pub fn on(&mut self, ch: usize, timeout: Option<Duration>, now: Instant) -> bool {
        if ch >= N {
            return false;
        }
        self.pulse_until[ch] = None;
        self.drive(ch, true);
        self.latch_until[ch] = self.resolve_timeout(timeout).map(|t| now + t);
        true
    }

    /// Drive a channel off and clear both deadlines.
    pub fn off(&mut self, ch: usize) -> bool {
        if ch >= N {
            return false;
        }
        self.pulse_until[ch] = None;
        self.latch_until[ch] = None;
        self.drive(ch, false);
        true
    }

    /// Pulse a channel on for `duration` (clamped to at least 1 ms).
    ///
    /// A pulse takes priority over a pending latch: the latch deadline is
    /// cleared and subsequent expiry follows the pulse.
    pub fn pulse(&mut self, ch: usize, duration: Duration, now: Instant) -> bool {
        if ch >= N {
            return false;
        }
        self.latch_until[ch] = None;
        self.drive(ch, true);
        self.pulse_until[ch] = Some(now + duration.max(MIN_PULSE));
        true
    }

    /// Refresh a channel's latch deadline, same resolution order as
    /// [`on`](Self::on). Does not change the on/off state.
    ///
    /// With no active deadline and no timeout configured anywhere, the
    /// channel is running untimed and there is nothing to refresh.
    pub fn keep_alive(
        &mut self,
        ch: usize,
        timeout: Option<Duration>,
        now: Instant,
    ) -> Option<KeepAlive> {
        if ch >= N {
            return None;
        }
        if self.latch_until[ch].is_none() && timeout.is_none() && self.default_timeout.is_none() {
            return Some(KeepAlive::Untimed);
        }
        match self.resolve_timeout(timeout) {
            Some(t) => {
                self.latch_until[ch] = Some(now + t);
                Some(KeepAlive::Refreshed)
            }
            None => Some(KeepAlive::Untimed),
        }
    }

    /// Timer maintenance: expire elapsed pulse and latch deadlines.
    ///
    /// Both checks run for every channel on every call. Expiry is never
    /// early; it is late by at most the interval between calls.
    pub fn tick(&mut self, now: Instant) {
        for ch in 0..N {
            if let Some(deadline) = self.pulse_until[ch] {
                if timebase::is_due(deadline, now) {
                    self.pulse_until[ch] = None;
                    self.drive(ch, false);
                }
            }
            if let Some(deadline) = self.latch_until[ch] {
                if timebase::is_due(deadline, now) {
                    self.latch_until[ch] = None;
                    self.drive(ch, false);
                }
            }
        }
    }

    /// Drive every channel off.
    pub fn all_off(&mut self) {
        for ch in 0..N {
            let _ = self.off(ch);
        }
    }
}
