// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Rgba` color type and hex-string parsing.

use crate::error::RenderError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, Mul};
use std::str::FromStr;

/// A display-referred RGBA color with `f32` components in `[0.0, 1.0]`.
///
/// Avatar colors and shader terms are authored as hex strings and the shading
/// model operates directly on those encoded values, so no gamma conversion
/// happens anywhere between parsing and PNG output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Rgba {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl Rgba {
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black (`[0.0, 0.0, 0.0, 0.0]`).
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `Rgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Rgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from 8-bit channels.
    #[inline]
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            rgba[0] as f32 / 255.0,
            rgba[1] as f32 / 255.0,
            rgba[2] as f32 / 255.0,
            rgba[3] as f32 / 255.0,
        )
    }

    /// Quantizes the color to 8-bit channels, clamping out-of-range values.
    #[inline]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Parses a hex color string.
    ///
    /// Accepts `RGB`, `RRGGBB` and `RRGGBBAA`, with or without a leading `#`.
    /// The short form expands each digit (`"777"` is `"777777"`).
    ///
    /// # Example
    /// ```
    /// use avatar_core::math::Rgba;
    /// let skin = Rgba::from_hex("eab372").unwrap();
    /// assert_eq!(skin.to_rgba8(), [0xea, 0xb3, 0x72, 0xff]);
    /// assert!(Rgba::from_hex("not a color").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, RenderError> {
        let invalid = || RenderError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        let rgba = match digits.len() {
            3 => {
                let mut out = [255u8; 4];
                for (i, c) in digits.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    out[i] = v * 17;
                }
                out
            }
            6 | 8 => {
                let mut out = [255u8; 4];
                for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
                    // Already validated as ASCII hex digits.
                    let s = std::str::from_utf8(chunk).map_err(|_| invalid())?;
                    out[i] = channel(s)?;
                }
                out
            }
            _ => return Err(invalid()),
        };

        Ok(Self::from_rgba8(rgba))
    }

    /// Formats the color as `RRGGBB` (alpha omitted when opaque).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("{r:02x}{g:02x}{b:02x}")
        } else {
            format!("{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Returns a new color with the same RGB components but a different alpha.
    #[inline]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }

    /// Linearly interpolates between two colors (all four channels).
    /// The factor `t` is clamped to `[0.0, 1.0]`.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: start.r + (end.r - start.r) * t,
            g: start.g + (end.g - start.g) * t,
            b: start.b + (end.b - start.b) * t,
            a: start.a + (end.a - start.a) * t,
        }
    }

    /// Component-wise minimum, alpha included.
    #[inline]
    pub fn min(&self, other: Self) -> Self {
        Self {
            r: self.r.min(other.r),
            g: self.g.min(other.g),
            b: self.b.min(other.b),
            a: self.a.min(other.a),
        }
    }
}

impl Default for Rgba {
    /// Returns opaque white by default.
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgba {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Add for Rgba {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl Mul<f32> for Rgba {
    type Output = Self;
    /// Scales all four channels.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
            a: self.a * rhs,
        }
    }
}

impl Mul for Rgba {
    type Output = Self;
    /// Multiplies two colors component-wise (modulation).
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
            a: self.a * rhs.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_from_hex_long_form() {
        let c = Rgba::from_hex("85ad00").unwrap();
        assert_eq!(c.to_rgba8(), [0x85, 0xad, 0x00, 0xff]);
        assert_eq!(Rgba::from_hex("#85AD00").unwrap(), c);
    }

    #[test]
    fn test_from_hex_short_form_expands_digits() {
        let c = Rgba::from_hex("AAA").unwrap();
        assert_eq!(c.to_rgba8(), [0xaa, 0xaa, 0xaa, 0xff]);
        assert!(approx_eq(c.r, 170.0 / 255.0));
    }

    #[test]
    fn test_from_hex_with_alpha() {
        let c = Rgba::from_hex("ff000080").unwrap();
        assert_eq!(c.to_rgba8(), [0xff, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn test_from_hex_rejects_malformed_strings() {
        for bad in ["", "#", "12345", "gggggg", "eab37", "é12345", "1234567"] {
            assert!(
                matches!(Rgba::from_hex(bad), Err(RenderError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_round_trip_through_serde() {
        let c: Rgba = serde_json::from_str("\"37302c\"").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"37302c\"");
        assert!(serde_json::from_str::<Rgba>("\"zz\"").is_err());
    }

    #[test]
    fn test_lerp_and_min() {
        let mid = Rgba::lerp(Rgba::BLACK, Rgba::WHITE, 0.5);
        assert!(approx_eq(mid.r, 0.5));
        assert!(approx_eq(mid.a, 1.0));

        let bright = Rgba::rgb(1.4, 0.2, 2.0).min(Rgba::WHITE);
        assert_eq!(bright, Rgba::rgb(1.0, 0.2, 1.0));
    }

    #[test]
    fn test_modulation() {
        let c = Rgba::rgb(0.5, 1.0, 0.25) * Rgba::rgb(0.5, 0.5, 1.0);
        assert_eq!(c, Rgba::rgb(0.25, 0.5, 0.25));
        assert_eq!((Rgba::WHITE * 0.5).to_rgba8(), [128, 128, 128, 128]);
    }
}
