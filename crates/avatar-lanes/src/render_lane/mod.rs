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

//! Rendering lane - hot path for rasterization

mod camera_fit;
mod clipping;
mod framebuffer;
mod raster_lane;
mod shader;

pub use camera_fit::*;
pub use clipping::*;
pub use framebuffer::*;
pub use raster_lane::*;
pub use shader::*;

use avatar_core::{error::RenderError, renderer::Scene};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Counters collected while rasterizing one scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Triangles submitted.
    pub triangles: u64,
    /// Triangles discarded by back-face culling or for having no area.
    pub culled: u64,
    /// Triangles entirely outside the depth range.
    pub clipped: u64,
    /// Samples that passed the depth test and were shaded.
    pub fragments: u64,
}

/// A trait defining the behavior of a rendering lane.
///
/// Rendering lanes turn a [`Scene`] into pixels in a [`Framebuffer`]. The
/// `RenderAgent` only talks to this trait, so alternative strategies can be
/// swapped in without touching scene assembly.
pub trait RenderLane: Send + Sync {
    /// Returns a human-readable identifier for this rendering strategy.
    fn strategy_name(&self) -> &'static str;

    /// Draws every object of `scene` into `framebuffer` with `shader`.
    ///
    /// The framebuffer is not cleared first.
    fn render(
        &self,
        scene: &Scene,
        shader: &PhongShader,
        framebuffer: &mut Framebuffer,
    ) -> Result<RenderStats, RenderError>;
}

/// Encodes an image as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_round_trips_through_decoder() {
        let img = RgbaImage::from_pixel(5, 3, image::Rgba([1, 2, 3, 4]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }
}
