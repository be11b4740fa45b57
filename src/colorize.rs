// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns normalized escape values into colors.
//!
//! The ramp runs black → blue → cyan → white in three equal bands of
//! 255 steps each.  Rounding is integral, so a given escape value
//! always produces the same color.

use num::clamp;

/// An 8-bit-per-channel color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel; always opaque on the ramp.
    pub alpha: u8,
}

impl Rgba {
    /// Packs the color as 0xRRGGBBAA.
    pub fn pack(self) -> u32 {
        u32::from_be_bytes([self.red, self.green, self.blue, self.alpha])
    }

    /// Unpacks a 0xRRGGBBAA value.
    pub fn unpack(packed: u32) -> Rgba {
        let [red, green, blue, alpha] = packed.to_be_bytes();
        Rgba {
            red,
            green,
            blue,
            alpha,
        }
    }
}

const BAND: i64 = 255;

/// Maps an escape value in [0, 1] onto the ramp.
pub fn colorize(t: f64) -> Rgba {
    let total = clamp((255.0 * 3.0 * t).round() as i64, 0, 3 * BAND);
    let (red, green, blue) = if total > 2 * BAND {
        (total - 2 * BAND, BAND, BAND)
    } else if total > BAND {
        (0, total - BAND, BAND)
    } else {
        (0, 0, total)
    };
    Rgba {
        red: red as u8,
        green: green as u8,
        blue: blue as u8,
        alpha: 255,
    }
}

/// Consumes a buffer of escape values and returns the packed colors,
/// pixel for pixel in the same order.
pub fn colorize_buffer(data: Vec<f64>) -> Vec<u32> {
    data.into_iter().map(|t| colorize(t).pack()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(red: u8, green: u8, blue: u8) -> Rgba {
        Rgba {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    #[test]
    fn members_are_black() {
        assert_eq!(colorize(0.0), rgba(0, 0, 0));
    }

    #[test]
    fn the_far_end_is_white() {
        assert_eq!(colorize(1.0), rgba(255, 255, 255));
    }

    #[test]
    fn each_band_fills_one_channel() {
        assert_eq!(colorize(1.0 / 3.0), rgba(0, 0, 255));
        assert_eq!(colorize(0.5), rgba(0, 128, 255));
        assert_eq!(colorize(2.0 / 3.0), rgba(0, 255, 255));
        assert_eq!(colorize(0.9), rgba(179, 255, 255));
        assert_eq!(colorize(0.1), rgba(0, 0, 77));
    }

    #[test]
    fn the_ramp_never_gets_darker() {
        let mut previous = 0u32;
        for step in 0..=1000 {
            let color = colorize(f64::from(step) / 1000.0);
            let brightness = u32::from(color.red) + u32::from(color.green) + u32::from(color.blue);
            assert!(brightness >= previous);
            previous = brightness;
        }
    }

    #[test]
    fn packing_is_rgba_order() {
        assert_eq!(rgba(0, 0, 0).pack(), 0x0000_00ff);
        assert_eq!(rgba(0x12, 0x34, 0x56).pack(), 0x1234_56ff);
        assert_eq!(Rgba::unpack(0x1234_56ff), rgba(0x12, 0x34, 0x56));
    }

    #[test]
    fn buffers_keep_their_layout() {
        let packed = colorize_buffer(vec![0.0, 1.0, 0.5]);
        assert_eq!(packed, vec![0x0000_00ff, 0xffff_ffff, 0x0080_ffff]);
    }
}
