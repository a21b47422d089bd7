//! Non-blocking animated-light effects.
//!
//! Each effect is a self-clocked state machine rendering into its own
//! [`Strip`](crate::Strip). State lives for the process lifetime; no
//! allocation happens after construction.

mod flash;
mod fuse;

pub use flash::{DEFAULT_FLASH_ENVELOPE, Envelope, FlashEffect, MAX_WAYPOINTS, Waypoint};
pub use fuse::{DEFAULT_BURN, FuseEffect, FuseMode};

/// Outcome of one effect tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTick {
    /// Effect is inactive; nothing was rendered.
    Idle,
    /// A frame was rendered.
    Rendered,
    /// The effect completed during this tick.
    Finished,
}

impl EffectTick {
    /// Whether this tick produced output.
    pub const fn produced_frame(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
