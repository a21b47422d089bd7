//! Fixed-length pixel buffer bound to one physical strip.

use crate::OutputDriver;
use crate::color::{BLACK, Rgb};

/// Frame buffer plus the driver that owns the physical strip.
///
/// Length is fixed at construction. Mutation is index-addressed and
/// bounds-checked (out-of-range writes are skipped); [`Strip::write`] is
/// the only point at which hardware is touched.
pub struct Strip<O: OutputDriver, const N: usize> {
    buffer: [Rgb; N],
    output: O,
}

impl<O: OutputDriver, const N: usize> Strip<O, N> {
    /// Create a strip with an all-black buffer.
    pub fn new(output: O) -> Self {
        Self {
            buffer: [BLACK; N],
            output,
        }
    }

    /// Number of pixels.
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Set one pixel. Out-of-range indices are ignored.
    pub const fn set(&mut self, index: usize, color: Rgb) {
        if index < N {
            self.buffer[index] = color;
        }
    }

    /// Zero the whole buffer (does not flush).
    pub fn clear(&mut self) {
        self.buffer = [BLACK; N];
    }

    /// Fill the whole buffer with one color (does not flush).
    pub fn fill(&mut self, color: Rgb) {
        self.buffer = [color; N];
    }

    /// Flush the buffer to hardware.
    pub fn write(&mut self) {
        self.output.write(&self.buffer);
    }
}
