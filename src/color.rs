//! Packed-color helpers.
//!
//! Colors cross the [`LedRing`](crate::LedRing) boundary as packed
//! `0xRRGGBB` values, matching the wire format of common addressable-LED
//! drivers. This module provides the pack/unpack/scale arithmetic the
//! animations are built from, plus a gamma-corrected hue wheel for the
//! rainbow modes.

use palette::{FromColor, Hsv, Srgb};

/// Packs RGB components into a `0xRRGGBB` value.
#[inline]
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Splits a packed color into its RGB components.
#[inline]
pub fn unpack(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Scales each component of a packed color by `level / 255`.
#[inline]
pub fn scale(color: u32, level: u8) -> u32 {
    let (r, g, b) = unpack(color);
    pack(
        (u32::from(r) * u32::from(level) / 255) as u8,
        (u32::from(g) * u32::from(level) / 255) as u8,
        (u32::from(b) * u32::from(level) / 255) as u8,
    )
}

/// Maps a position on the 16-bit color wheel to a packed color.
///
/// The full `0..=65535` range covers one revolution of the hue circle.
/// The result is converted through the sRGB transfer function so the
/// perceptual hue sweep comes out linear on LED hardware.
pub fn hue_wheel(hue: u16) -> u32 {
    let degrees = f32::from(hue) * 360.0 / 65536.0;
    let srgb: Srgb = Srgb::from_color(Hsv::new(degrees, 1.0, 1.0));
    let linear = srgb.into_linear().into_format::<u8>();
    pack(linear.red, linear.green, linear.blue)
}
