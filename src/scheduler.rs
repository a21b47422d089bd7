//! Cooperative tick scheduler.
//!
//! One iteration performs, in order: relay timer maintenance, effect
//! rendering, command ingestion and dispatch, then pacing. The caller
//! owns the loop and the yield; this type only tells it how long to
//! sleep. Sensor and button polling are collaborator steps the caller
//! interleaves between ticks.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::command::CommandReceiver;
use crate::outputs::Outputs;

/// Default tick rate (200 Hz).
///
/// A 5 ms period keeps the interval between ticks well under any
/// practical pulse or latch duration, so expiry is late by at most one
/// period.
pub const DEFAULT_TICK_HZ: u32 = 200;

/// Default tick period based on the target rate.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000 / DEFAULT_TICK_HZ as u64);

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// Deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to yield before the next tick (zero if behind schedule).
    pub sleep: Duration,
    /// Commands drained this tick that were not recognized or not
    /// applied. Emission (acknowledgement, "unknown command" telemetry)
    /// is the caller's responsibility.
    pub rejected: u32,
}

/// Drives the output managers from a single externally-supplied clock.
pub struct TickScheduler<'a, P, SO, LO, const R: usize, const NS: usize, const NL: usize, const CMDS: usize>
where
    P: OutputPin,
    SO: OutputDriver,
    LO: OutputDriver,
{
    outputs: Outputs<P, SO, LO, R, NS, NL>,
    commands: CommandReceiver<'a, CMDS>,
    next_tick: Instant,
    period: Duration,
}

impl<'a, P, SO, LO, const R: usize, const NS: usize, const NL: usize, const CMDS: usize>
    TickScheduler<'a, P, SO, LO, R, NS, NL, CMDS>
where
    P: OutputPin,
    SO: OutputDriver,
    LO: OutputDriver,
{
    /// Create a scheduler with the default 200 Hz pacing.
    pub fn new(outputs: Outputs<P, SO, LO, R, NS, NL>, commands: CommandReceiver<'a, CMDS>) -> Self {
        Self::with_period(outputs, commands, DEFAULT_TICK_PERIOD)
    }

    pub fn with_period(
        outputs: Outputs<P, SO, LO, R, NS, NL>,
        commands: CommandReceiver<'a, CMDS>,
        period: Duration,
    ) -> Self {
        Self {
            outputs,
            commands,
            next_tick: Instant::from_ticks(0),
            period,
        }
    }

    /// Run one loop iteration and return pacing information.
    ///
    /// The caller is responsible for yielding for `sleep` before calling
    /// again; none of the work here blocks.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Drift correction: if we have fallen more than two periods
        // behind, resync to now instead of running a catch-up burst.
        let max_drift = self.period.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        // Timer maintenance and rendering come first so a flood of
        // commands can never starve relay expiry.
        self.outputs.tick(now);

        let mut rejected: u32 = 0;
        while let Ok(cmd) = self.commands.try_receive() {
            if !self.outputs.handle(&cmd, now) {
                rejected += 1;
                #[cfg(feature = "esp32-log")]
                println!("cmd rejected: {:?}", cmd);
            }
        }

        self.next_tick += self.period;

        let sleep = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep,
            rejected,
        }
    }

    pub const fn outputs(&self) -> &Outputs<P, SO, LO, R, NS, NL> {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut Outputs<P, SO, LO, R, NS, NL> {
        &mut self.outputs
    }
}
