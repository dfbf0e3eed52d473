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

//! Defines CPU-side textures and how they are sampled.

use crate::{
    asset::Asset,
    math::{wrap01, Rgba, Vec2},
};

/// Defines how texture coordinates are handled when sampling outside the `[0, 1]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Coordinates wrap around. `1.1` becomes `0.1`.
    #[default]
    Repeat,
    /// Coordinates are clamped to the edge. `1.1` becomes `1.0`.
    ClampToEdge,
}

/// Defines the filtering mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Point sampling. Returns the value of the nearest texel.
    Nearest,
    /// Linear interpolation. Returns a weighted average of the four nearest texels.
    #[default]
    Linear,
}

/// Describes how the rasterizer reads a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerDescriptor {
    /// Addressing applied to both axes.
    pub address_mode: AddressMode,
    /// Filtering between texels.
    pub filter: FilterMode,
}

/// A decoded 8-bit RGBA image with straight (non-premultiplied) alpha.
///
/// Row 0 is the top of the image. Texture coordinates follow the OBJ
/// convention where `v = 0` is the bottom row, so sampling flips `v`.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Asset for Texture {}

impl Texture {
    /// Wraps raw RGBA8 pixels.
    ///
    /// Returns `None` if either dimension is zero or the buffer length is not
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (width > 0 && height > 0 && pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a 1x1 texture of a single color.
    pub fn solid(color: Rgba) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: color.to_rgba8().to_vec(),
        }
    }

    /// Width in texels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 pixel data, row-major from the top-left corner.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the texel at `(x, y)` with premultiplied alpha.
    ///
    /// Coordinates are clamped to the image.
    #[inline]
    pub fn texel_premultiplied(&self, x: u32, y: u32) -> Rgba {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        let c = Rgba::from_rgba8([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]);
        Rgba::new(c.r * c.a, c.g * c.a, c.b * c.a, c.a)
    }

    /// Samples the texture at the texture coordinate `uv`.
    ///
    /// Filtering happens on premultiplied values; the result is premultiplied
    /// too, so callers recover the straight color by dividing by alpha.
    pub fn sample(&self, uv: Vec2, sampler: &SamplerDescriptor) -> Rgba {
        let address = |t: f32| match sampler.address_mode {
            AddressMode::Repeat => wrap01(t),
            AddressMode::ClampToEdge => t.clamp(0.0, 1.0),
        };
        let u = address(uv.x);
        let v = address(1.0 - uv.y);

        let x = u * (self.width - 1) as f32;
        let y = v * (self.height - 1) as f32;

        match sampler.filter {
            FilterMode::Nearest => self.texel_premultiplied(x.round() as u32, y.round() as u32),
            FilterMode::Linear => {
                let (x0, y0) = (x.floor(), y.floor());
                let (fx, fy) = (x - x0, y - y0);
                let (x0, y0) = (x0 as u32, y0 as u32);

                let c00 = self.texel_premultiplied(x0, y0);
                let c10 = self.texel_premultiplied(x0 + 1, y0);
                let c01 = self.texel_premultiplied(x0, y0 + 1);
                let c11 = self.texel_premultiplied(x0 + 1, y0 + 1);

                let top = Rgba::lerp(c00, c10, fx);
                let bottom = Rgba::lerp(c01, c11, fx);
                Rgba::lerp(top, bottom, fy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    /// 2x2 texture: top row red, green; bottom row blue, transparent.
    fn quad() -> Texture {
        Texture::from_rgba8(
            2,
            2,
            vec![
                255, 0, 0, 255, /**/ 0, 255, 0, 255, //
                0, 0, 255, 255, /**/ 0, 0, 0, 0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rgba8_validates_length() {
        assert!(Texture::from_rgba8(2, 2, vec![0; 15]).is_none());
        assert!(Texture::from_rgba8(0, 2, Vec::new()).is_none());
        assert_eq!(quad().width(), 2);
    }

    #[test]
    fn test_sample_flips_v() {
        let t = quad();
        let nearest = SamplerDescriptor {
            filter: FilterMode::Nearest,
            ..Default::default()
        };
        // v = 0 is the bottom row.
        assert_eq!(t.sample(Vec2::new(0.0, 0.001), &nearest), Rgba::rgb(0.0, 0.0, 1.0));
        assert_eq!(t.sample(Vec2::new(0.0, 0.999), &nearest), Rgba::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_linear_sample_blends_premultiplied() {
        let t = quad();
        let c = t.sample(Vec2::new(0.5, 0.5), &SamplerDescriptor::default());
        // Average of red, green, blue and transparent black.
        assert!(approx_eq(c.r, 0.25));
        assert!(approx_eq(c.g, 0.25));
        assert!(approx_eq(c.b, 0.25));
        assert!(approx_eq(c.a, 0.75));
    }

    #[test]
    fn test_repeat_wraps_coordinates() {
        let t = quad();
        let s = SamplerDescriptor::default();
        assert_eq!(t.sample(Vec2::new(1.25, 0.5), &s), t.sample(Vec2::new(0.25, 0.5), &s));
        assert_eq!(t.sample(Vec2::new(-0.75, 0.5), &s), t.sample(Vec2::new(0.25, 0.5), &s));
    }

    #[test]
    fn test_solid_texture() {
        let t = Texture::solid(Rgba::WHITE);
        assert_eq!(t.sample(Vec2::new(0.3, 0.7), &SamplerDescriptor::default()), Rgba::WHITE);
    }
}
