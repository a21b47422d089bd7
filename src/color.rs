//! Integer-only color math.
//!
//! All channel arithmetic is saturating and uses 8-bit integer scaling,
//! never floating point, so rendering is deterministic and cheap on
//! constrained hardware.

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Scale an 8-bit channel by an 8-bit intensity (0-255 = 0.0-1.0).
///
/// Floor division: `value * scale / 255`. Identities: `scale8(v, 255) == v`
/// and `scale8(v, 0) == 0`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * scale as u16) / 255) as u8
}

/// Blend two 8-bit values, `amount_of_b` = 0-255.
///
/// Rounded integer blend; exact at both endpoints.
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Scale a color by an 8-bit intensity, channel-wise.
#[inline]
pub const fn scale_rgb(color: Rgb, intensity: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, intensity),
        g: scale8(color.g, intensity),
        b: scale8(color.b, intensity),
    }
}

/// Linearly interpolate between two colors, `amount_of_b` = 0-255.
///
/// `mix_rgb(a, b, 0) == a` and `mix_rgb(a, b, 255) == b`; each channel is
/// monotonic in between.
#[inline]
pub const fn mix_rgb(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Additive mix of two colors, clamped to 255 per channel.
#[inline]
pub const fn add_saturating(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// All channels off.
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
