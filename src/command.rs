//! Structured output commands.
//!
//! The transport collaborator decodes its line-framed payloads into this
//! closed enum; the core performs no framing or decoding itself. Keeping
//! the variants closed makes dispatch exhaustiveness checkable at build
//! time, unlike open-ended key lookup.

use embassy_time::Duration;

use crate::channel::{Channel, Receiver, Sender};
use crate::effect::Envelope;

/// Default pulse length when a `relay_pulse` command carries none.
pub const DEFAULT_PULSE: Duration = Duration::from_millis(250);

/// One decoded output command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Latch a relay on (with optional timeout) or drive it off.
    Relay {
        id: usize,
        on: bool,
        timeout: Option<Duration>,
    },
    /// Pulse a relay; `None` duration means [`DEFAULT_PULSE`].
    RelayPulse {
        id: usize,
        duration: Option<Duration>,
    },
    /// Refresh a relay's latch timeout.
    RelayKeepAlive {
        id: usize,
        timeout: Option<Duration>,
    },
    /// Latch every relay on, or drive every relay off.
    RelaysAll {
        on: bool,
        timeout: Option<Duration>,
    },
    /// Start the fuse animation; `None` duration uses the default burn.
    LedFuse { duration: Option<Duration> },
    /// Start the flash envelope; `None` uses the built-in envelope.
    LedFlash { points: Option<Envelope> },
    /// Stop all LED effects and blank the strips.
    LedStop,
    /// Anything the transport could not map onto the shapes above.
    /// Dispatch reports it unapplied; no side effect.
    Unrecognized,
}

/// Bounded queue carrying decoded commands from the transport into the
/// control loop.
pub type CommandChannel<const SIZE: usize> = Channel<Command, SIZE>;

pub type CommandSender<'a, const SIZE: usize> = Sender<'a, Command, SIZE>;

pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, Command, SIZE>;
