#![no_std]

pub mod channel;
pub mod color;
pub mod command;
pub mod effect;
pub mod engine;
pub mod outputs;
pub mod peers;
pub mod relay;
pub mod scheduler;
pub mod strip;
pub mod timebase;

pub use channel::{Channel, Receiver, Sender};
pub use command::{Command, CommandChannel, CommandReceiver, CommandSender};
pub use effect::{EffectTick, Envelope, FlashEffect, FuseEffect, FuseMode, Waypoint};
pub use engine::EffectEngine;
pub use outputs::Outputs;
pub use peers::PeerRegistry;
pub use relay::{KeepAlive, Polarity, RelayBank};
pub use scheduler::{TickResult, TickScheduler};
pub use strip::Strip;
pub use timebase::MAX_TICK_DELTA;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// A [`Strip`] pushes its frame buffer through this on every flush;
/// the write is assumed synchronous and non-failing at this layer.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
