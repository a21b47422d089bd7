//! Traveling "burning fuse" animation.
//!
//! A hot point travels from the far end of the strip toward index 0 over
//! the configured burn duration, trailed by an ember. Position math is
//! 24.8 fixed point; color math is integer-only.

use embassy_time::{Duration, Instant};

use super::EffectTick;
use crate::color::{Rgb, add_saturating, scale8, scale_rgb};
use crate::strip::Strip;
use crate::{OutputDriver, timebase};

const HOT_COLOR: Rgb = Rgb {
    r: 255,
    g: 180,
    b: 20,
};
const EMBER_COLOR: Rgb = Rgb { r: 255, g: 40, b: 0 };

const HOT_INTENSITY: u8 = 90;
const EMBER_INTENSITY: u8 = 80;

/// Default burn duration when a command supplies none.
pub const DEFAULT_BURN: Duration = Duration::from_secs(8);

const MIN_DURATION: Duration = Duration::from_millis(1);

/// How the burn point is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuseMode {
    /// Hot pixel plus one ember pixel, fixed intensities.
    TwoPixel,
    /// Three pixels with a fractional crossfade between hot and ember.
    #[default]
    Smooth,
}

/// Burning-fuse effect bound to one strip.
pub struct FuseEffect<O: OutputDriver, const N: usize> {
    strip: Strip<O, N>,
    mode: FuseMode,
    active: bool,
    elapsed: Duration,
    duration: Duration,
    last_tick: Instant,
}

impl<O: OutputDriver, const N: usize> FuseEffect<O, N> {
    pub fn new(strip: Strip<O, N>) -> Self {
        Self {
            strip,
            mode: FuseMode::default(),
            active: false,
            elapsed: Duration::from_ticks(0),
            duration: DEFAULT_BURN,
            last_tick: Instant::from_ticks(0),
        }
    }

    pub fn with_mode(mut self, mode: FuseMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn strip(&self) -> &Strip<O, N> {
        &self.strip
    }

    /// Start (or restart) the burn. Duration is clamped to at least 1 ms.
    pub fn start(&mut self, duration: Duration, now: Instant) {
        self.duration = duration.max(MIN_DURATION);
        self.elapsed = Duration::from_ticks(0);
        self.last_tick = now;
        self.active = true;
    }

    /// Stop the effect; optionally blank the strip.
    pub fn stop(&mut self, clear: bool) {
        self.active = false;
        if clear {
            self.strip.clear();
            self.strip.write();
        }
    }

    /// Advance using the effect's own last-tick timestamp.
    pub fn tick(&mut self, now: Instant) -> EffectTick {
        if !self.active {
            self.last_tick = now;
            return EffectTick::Idle;
        }
        let dt = timebase::step_since(self.last_tick, now);
        self.last_tick = now;
        self.step(dt)
    }

    /// Advance by an explicit delta (clamped like [`tick`](Self::tick)).
    pub fn step(&mut self, dt: Duration) -> EffectTick {
        if !self.active {
            return EffectTick::Idle;
        }

        self.elapsed = self.elapsed + timebase::clamp_step(dt);
        if self.elapsed >= self.duration {
            self.stop(true);
            return EffectTick::Finished;
        }

        self.render();
        EffectTick::Rendered
    }

    /// Render the current burn position. Clears first so no stale pixels
    /// persist, then flushes.
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self) {
        self.strip.clear();

        if N > 0 {
            // position = (N-1) * (1 - progress), 24.8 fixed point;
            // the lit point travels toward index 0 as time advances.
            let remaining = self.duration.as_millis() - self.elapsed.as_millis();
            let pos_fp = ((N as u64 - 1) * remaining << 8) / self.duration.as_millis();
            let i = (pos_fp >> 8) as usize;
            let f = (pos_fp & 0xff) as u8;
            let inv_f = 255 - f;

            match self.mode {
                FuseMode::TwoPixel => {
                    self.strip.set(i, scale_rgb(HOT_COLOR, HOT_INTENSITY));
                    self.strip.set(i + 1, scale_rgb(EMBER_COLOR, EMBER_INTENSITY));
                }
                FuseMode::Smooth => {
                    // Fading tail behind the head.
                    let tail = scale_rgb(HOT_COLOR, scale8(HOT_INTENSITY, f) / 2);
                    self.strip.set(i + 2, tail);

                    // Crossfade pixel: hot handing over to ember.
                    let hot_part = scale_rgb(HOT_COLOR, scale8(HOT_INTENSITY, inv_f));
                    let ember_part = scale_rgb(EMBER_COLOR, scale8(EMBER_INTENSITY, f));
                    self.strip.set(i + 1, add_saturating(hot_part, ember_part));

                    // Fading head.
                    self.strip
                        .set(i, scale_rgb(EMBER_COLOR, scale8(EMBER_INTENSITY, inv_f)));
                }
            }
        }

        self.strip.write();
    }
}
