//! Command dispatcher over the relay bank and effect engine.

use embassy_time::Instant;
use embedded_hal::digital::OutputPin;

use crate::OutputDriver;
use crate::command::{Command, DEFAULT_PULSE};
use crate::engine::EffectEngine;
use crate::relay::RelayBank;

/// Owns both output managers and translates commands into calls on them.
///
/// The dispatcher holds no hardware handles of its own and keeps no
/// per-command state; every command is a pure, bounded, synchronous
/// mutation of the two managers.
pub struct Outputs<P, SO, LO, const R: usize, const NS: usize, const NL: usize>
where
    P: OutputPin,
    SO: OutputDriver,
    LO: OutputDriver,
{
    relays: RelayBank<P, R>,
    led: EffectEngine<SO, LO, NS, NL>,
}

impl<P, SO, LO, const R: usize, const NS: usize, const NL: usize> Outputs<P, SO, LO, R, NS, NL>
where
    P: OutputPin,
    SO: OutputDriver,
    LO: OutputDriver,
{
    pub fn new(relays: RelayBank<P, R>, led: EffectEngine<SO, LO, NS, NL>) -> Self {
        Self { relays, led }
    }

    /// Timer maintenance and effect rendering for one loop iteration.
    ///
    /// Relay deadlines are checked first, then both effects advance.
    /// Returns true if an effect produced a frame.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.relays.tick(now);
        self.led.tick(now)
    }

    /// Apply one decoded command. Returns whether it was recognized and
    /// applied; a false never leaves partial state behind on the touched
    /// channel.
    pub fn handle(&mut self, cmd: &Command, now: Instant) -> bool {
        match cmd {
            Command::Relay {
                id,
                on: true,
                timeout,
            } => self.relays.on(*id, *timeout, now),
            Command::Relay { id, on: false, .. } => self.relays.off(*id),
            Command::RelayPulse { id, duration } => {
                self.relays.pulse(*id, duration.unwrap_or(DEFAULT_PULSE), now)
            }
            Command::RelayKeepAlive { id, timeout } => {
                self.relays.keep_alive(*id, *timeout, now).is_some()
            }
            Command::RelaysAll { on: true, timeout } => {
                let mut ok = true;
                for ch in 0..self.relays.channel_count() {
                    ok &= self.relays.on(ch, *timeout, now);
                }
                ok
            }
            Command::RelaysAll { on: false, .. } => {
                self.relays.all_off();
                true
            }
            Command::LedFuse { duration } => {
                self.led.start_fuse(*duration, now);
                true
            }
            Command::LedFlash { points } => {
                self.led.start_flash(points.as_deref(), now);
                true
            }
            Command::LedStop => {
                self.led.stop_all();
                true
            }
            Command::Unrecognized => false,
        }
    }

    pub const fn relays(&self) -> &RelayBank<P, R> {
        &self.relays
    }

    pub fn relays_mut(&mut self) -> &mut RelayBank<P, R> {
        &mut self.relays
    }

    pub const fn led(&self) -> &EffectEngine<SO, LO, NS, NL> {
        &self.led
    }

    pub fn led_mut(&mut self) -> &mut EffectEngine<SO, LO, NS, NL> {
        &mut self.led
    }
}
