//! Multi-segment color envelope ("flash" reaction).
//!
//! An envelope is an ordered list of waypoints; segment `i` fades the
//! whole strip from `points[i]` to `points[i + 1]` over
//! `points[i + 1].duration`. Waypoint 0's duration is carried but never
//! used as a transition length; its color is the immediate initial fill.
//! This matches the long-standing envelope convention and is deliberate.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::EffectTick;
use crate::color::{Rgb, mix_rgb};
use crate::strip::Strip;
use crate::timebase::progress8;
use crate::{OutputDriver, timebase};

/// Capacity of a flash envelope.
pub const MAX_WAYPOINTS: usize = 16;

/// One (segment duration, target color) pair within an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint {
    pub duration: Duration,
    pub color: Rgb,
}

impl Waypoint {
    pub const fn new(duration: Duration, color: Rgb) -> Self {
        Self { duration, color }
    }
}

/// Bounded waypoint list.
pub type Envelope = Vec<Waypoint, MAX_WAYPOINTS>;

/// Built-in flash envelope: dark ignition ramp, blue/white pop, warm decay.
pub const DEFAULT_FLASH_ENVELOPE: [Waypoint; 7] = [
    Waypoint::new(Duration::from_millis(0), Rgb { r: 0, g: 0, b: 0 }),
    Waypoint::new(Duration::from_millis(500), Rgb { r: 128, g: 96, b: 0 }),
    Waypoint::new(Duration::from_millis(80), Rgb { r: 0, g: 0, b: 255 }),
    Waypoint::new(
        Duration::from_millis(60),
        Rgb {
            r: 255,
            g: 255,
            b: 255,
        },
    ),
    Waypoint::new(
        Duration::from_millis(400),
        Rgb {
            r: 255,
            g: 120,
            b: 0,
        },
    ),
    Waypoint::new(Duration::from_millis(1000), Rgb { r: 255, g: 0, b: 0 }),
    Waypoint::new(Duration::from_millis(3000), Rgb { r: 0, g: 0, b: 0 }),
];

/// Flash envelope effect bound to one strip.
pub struct FlashEffect<O: OutputDriver, const N: usize> {
    strip: Strip<O, N>,
    active: bool,
    points: Envelope,
    segment: usize,
    segment_elapsed: Duration,
    segment_len: Duration,
    last_tick: Instant,
}

impl<O: OutputDriver, const N: usize> FlashEffect<O, N> {
    pub fn new(strip: Strip<O, N>) -> Self {
        Self {
            strip,
            active: false,
            points: Envelope::new(),
            segment: 0,
            segment_elapsed: Duration::from_ticks(0),
            segment_len: Duration::from_ticks(0),
            last_tick: Instant::from_ticks(0),
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn strip(&self) -> &Strip<O, N> {
        &self.strip
    }

    /// Start the envelope.
    ///
    /// Fewer than two waypoints, or more than [`MAX_WAYPOINTS`], is a
    /// degenerate envelope: the effect stops without touching the strip.
    /// Truncating an over-long envelope would drop its final fade-out and
    /// leave the strip lit, so such envelopes are rejected whole. The
    /// strip is immediately filled with waypoint 0's color.
    pub fn start(&mut self, points: &[Waypoint], now: Instant) {
        if points.len() < 2 || points.len() > MAX_WAYPOINTS {
            self.stop(false);
            return;
        }

        self.points.clear();
        for point in points {
            // Length checked above; push cannot fail.
            let _ = self.points.push(*point);
        }

        self.segment = 0;
        self.segment_elapsed = Duration::from_ticks(0);
        self.segment_len = self.points[1].duration;
        self.last_tick = now;
        self.active = true;

        self.strip.fill(self.points[0].color);
        self.strip.write();
    }

    /// Start with the built-in envelope.
    pub fn start_default(&mut self, now: Instant) {
        self.start(&DEFAULT_FLASH_ENVELOPE, now);
    }

    /// Stop the effect; optionally blank the strip.
    pub fn stop(&mut self, clear: bool) {
        self.active = false;
        self.points.clear();
        self.segment = 0;
        self.segment_elapsed = Duration::from_ticks(0);
        self.segment_len = Duration::from_ticks(0);
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
    ///
    /// One call may consume several segments: zero-length segments snap to
    /// their end color without consuming any of `dt`.
    pub fn step(&mut self, dt: Duration) -> EffectTick {
        if !self.active {
            return EffectTick::Idle;
        }

        let mut dt = timebase::clamp_step(dt);
        while dt.as_ticks() > 0 {
            let from = self.points[self.segment].color;
            let to = self.points[self.segment + 1].color;

            if self.segment_len.as_millis() == 0 {
                // Degenerate segment: snap and keep consuming the same dt.
                self.strip.fill(to);
                self.strip.write();
                if !self.advance_segment() {
                    return EffectTick::Finished;
                }
                continue;
            }

            let remaining = self.segment_len - self.segment_elapsed;
            let step = dt.min(remaining);
            self.segment_elapsed = self.segment_elapsed + step;
            dt = dt - step;

            let progress = progress8(self.segment_elapsed, self.segment_len);
            self.strip.fill(mix_rgb(from, to, progress));
            self.strip.write();

            if self.segment_elapsed >= self.segment_len {
                if !self.advance_segment() {
                    return EffectTick::Finished;
                }
            }
        }

        EffectTick::Rendered
    }

    /// Move to the next segment. Returns false when the envelope is done;
    /// the final waypoint color (typically black) is left showing.
    fn advance_segment(&mut self) -> bool {
        self.segment += 1;
        self.segment_elapsed = Duration::from_ticks(0);
        if self.segment + 1 >= self.points.len() {
            self.stop(false);
            return false;
        }
        self.segment_len = self.points[self.segment + 1].duration;
        true
    }
}
