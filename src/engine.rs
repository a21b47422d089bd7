//! Effect manager composing the fuse and flash effects.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::effect::{DEFAULT_BURN, FlashEffect, FuseEffect, FuseMode, Waypoint};
use crate::strip::Strip;

/// Owns zero, one or two effect instances, each bound to its own strip.
///
/// Strip presence is configuration-driven; every operation against an
/// absent strip is a safe no-op. The two effects run fully independently
/// and concurrently (there is no shared render buffer, so overlap is
/// safe).
pub struct EffectEngine<SO, LO, const NS: usize, const NL: usize>
where
    SO: OutputDriver,
    LO: OutputDriver,
{
    fuse: Option<FuseEffect<SO, NS>>,
    flash: Option<FlashEffect<LO, NL>>,
}

impl<SO, LO, const NS: usize, const NL: usize> EffectEngine<SO, LO, NS, NL>
where
    SO: OutputDriver,
    LO: OutputDriver,
{
    /// Build the engine from the configured strips; present strips are
    /// blanked and flushed once so boot state is dark.
    pub fn new(short: Option<Strip<SO, NS>>, long: Option<Strip<LO, NL>>) -> Self {
        Self::with_fuse_mode(short, long, FuseMode::default())
    }

    pub fn with_fuse_mode(
        short: Option<Strip<SO, NS>>,
        long: Option<Strip<LO, NL>>,
        mode: FuseMode,
    ) -> Self {
        let fuse = short.map(|mut strip| {
            strip.clear();
            strip.write();
            FuseEffect::new(strip).with_mode(mode)
        });
        let flash = long.map(|mut strip| {
            strip.clear();
            strip.write();
            FlashEffect::new(strip)
        });
        Self { fuse, flash }
    }

    /// Start the fuse burn; `None` uses the default 8 s duration.
    pub fn start_fuse(&mut self, duration: Option<Duration>, now: Instant) {
        if let Some(fuse) = self.fuse.as_mut() {
            fuse.start(duration.unwrap_or(DEFAULT_BURN), now);
        }
    }

    /// Start the flash envelope; `None` uses the built-in envelope.
    pub fn start_flash(&mut self, points: Option<&[Waypoint]>, now: Instant) {
        if let Some(flash) = self.flash.as_mut() {
            match points {
                Some(points) => flash.start(points, now),
                None => flash.start_default(now),
            }
        }
    }

    pub fn stop_fuse(&mut self, clear: bool) {
        if let Some(fuse) = self.fuse.as_mut() {
            fuse.stop(clear);
        }
    }

    pub fn stop_flash(&mut self, clear: bool) {
        if let Some(flash) = self.flash.as_mut() {
            flash.stop(clear);
        }
    }

    /// Stop both effects and blank both strips.
    pub fn stop_all(&mut self) {
        self.stop_fuse(true);
        self.stop_flash(true);
    }

    /// Tick both effects. Returns true if either produced a frame.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut rendered = false;
        if let Some(fuse) = self.fuse.as_mut() {
            rendered |= fuse.tick(now).produced_frame();
        }
        if let Some(flash) = self.flash.as_mut() {
            rendered |= flash.tick(now).produced_frame();
        }
        rendered
    }

    pub const fn fuse(&self) -> Option<&FuseEffect<SO, NS>> {
        self.fuse.as_ref()
    }

    pub const fn flash(&self) -> Option<&FlashEffect<LO, NL>> {
        self.flash.as_ref()
    }
}
