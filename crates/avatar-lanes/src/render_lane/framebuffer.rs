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

//! The supersampled render target.

use avatar_core::{error::RenderError, math::Rgba};
use image::RgbaImage;

/// Largest side length, in samples, of a supersampled framebuffer.
pub const MAX_RENDER_DIMENSION: u32 = 16_384;

/// Color and depth buffers rendered at `scale` times the output resolution.
///
/// Colors are stored with premultiplied alpha so the box-filter downsample in
/// [`Framebuffer::resolve`] averages coverage correctly at silhouette edges.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    scale: u32,
    color: Vec<Rgba>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Allocates a framebuffer producing a `width` x `height` image, rendered
    /// internally at `width * scale` x `height * scale`.
    ///
    /// The color buffer starts fully transparent and the depth buffer at
    /// positive infinity.
    pub fn new(width: u32, height: u32, scale: u32) -> Result<Self, RenderError> {
        if scale == 0 {
            return Err(RenderError::InvalidScale);
        }
        let max = MAX_RENDER_DIMENSION / scale;
        for side in [width, height] {
            if side == 0 || side > max {
                return Err(RenderError::InvalidSize {
                    size: side as i64,
                    max,
                });
            }
        }

        let samples = (width * scale) as usize * (height * scale) as usize;
        Ok(Self {
            width,
            height,
            scale,
            color: vec![Rgba::TRANSPARENT; samples],
            depth: vec![f32::INFINITY; samples],
        })
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Supersampling factor per axis.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Width of the internal sample grid.
    #[inline]
    pub fn render_width(&self) -> u32 {
        self.width * self.scale
    }

    /// Height of the internal sample grid.
    #[inline]
    pub fn render_height(&self) -> u32 {
        self.height * self.scale
    }

    /// Output aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Resets color to transparent and depth to infinity.
    pub fn clear(&mut self) {
        self.color.fill(Rgba::TRANSPARENT);
        self.depth.fill(f32::INFINITY);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.render_width() as usize + x as usize
    }

    /// Returns the stored depth of a sample.
    #[inline]
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[self.index(x, y)]
    }

    /// Returns the stored premultiplied color of a sample.
    #[inline]
    pub fn color_at(&self, x: u32, y: u32) -> Rgba {
        self.color[self.index(x, y)]
    }

    /// Returns `true` if `depth` is strictly closer than the stored sample.
    #[inline]
    pub fn depth_test(&self, x: u32, y: u32, depth: f32) -> bool {
        depth < self.depth[self.index(x, y)]
    }

    /// Composites a straight-alpha color over a sample and records its depth.
    #[inline]
    pub fn write(&mut self, x: u32, y: u32, depth: f32, color: Rgba) {
        let i = self.index(x, y);
        let a = color.a.clamp(0.0, 1.0);
        let src = Rgba::new(color.r * a, color.g * a, color.b * a, a);
        self.color[i] = src + self.color[i] * (1.0 - a);
        self.depth[i] = depth;
    }

    /// Box-filters every `scale` x `scale` block of samples into one output
    /// pixel and quantizes it to straight-alpha RGBA8.
    pub fn resolve(&self) -> RgbaImage {
        let s = self.scale;
        let weight = 1.0 / (s * s) as f32;

        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let mut sum = Rgba::TRANSPARENT;
            for sy in y * s..(y + 1) * s {
                for sx in x * s..(x + 1) * s {
                    sum = sum + self.color_at(sx, sy);
                }
            }
            let avg = sum * weight;
            let straight = if avg.a > 0.0 {
                Rgba::new(avg.r / avg.a, avg.g / avg.a, avg.b / avg.a, avg.a)
            } else {
                Rgba::TRANSPARENT
            };
            image::Rgba(straight.to_rgba8())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_allocates_supersampled_buffers() {
        let fb = Framebuffer::new(4, 2, 3).unwrap();
        assert_eq!((fb.render_width(), fb.render_height()), (12, 6));
        assert_eq!(fb.color_at(11, 5), Rgba::TRANSPARENT);
        assert_eq!(fb.depth_at(0, 0), f32::INFINITY);
        assert_eq!(fb.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(matches!(Framebuffer::new(4, 4, 0), Err(RenderError::InvalidScale)));
        assert!(matches!(
            Framebuffer::new(0, 4, 3),
            Err(RenderError::InvalidSize { size: 0, .. })
        ));
        assert!(Framebuffer::new(MAX_RENDER_DIMENSION, 1, 3).is_err());
    }

    #[test]
    fn test_resolve_averages_coverage() {
        let mut fb = Framebuffer::new(1, 1, 2).unwrap();
        // Half the samples covered by opaque red.
        fb.write(0, 0, 0.5, Rgba::rgb(1.0, 0.0, 0.0));
        fb.write(1, 0, 0.5, Rgba::rgb(1.0, 0.0, 0.0));

        let img = fb.resolve();
        // Straight color stays pure red, alpha carries the coverage.
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    }

    #[test]
    fn test_empty_framebuffer_resolves_transparent() {
        let fb = Framebuffer::new(2, 2, 3).unwrap();
        assert!(fb.resolve().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_depth_test_is_strict() {
        let mut fb = Framebuffer::new(1, 1, 1).unwrap();
        assert!(fb.depth_test(0, 0, 0.9));
        fb.write(0, 0, 0.5, Rgba::WHITE);
        assert!(!fb.depth_test(0, 0, 0.5));
        assert!(fb.depth_test(0, 0, 0.4));

        fb.clear();
        assert_eq!(fb.depth_at(0, 0), f32::INFINITY);
    }
}
