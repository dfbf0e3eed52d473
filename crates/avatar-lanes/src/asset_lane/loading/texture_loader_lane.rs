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

//! Texture decoding.

use crate::asset_lane::{AssetLoaderLane, LoadError};
use anyhow::Context;
use avatar_core::renderer::Texture;

/// A lane dedicated to decoding image files into CPU textures.
///
/// Any format the `image` crate recognizes is accepted; the result is always
/// 8-bit RGBA with straight alpha, in the image's own (display) color space.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoaderLane;

impl AssetLoaderLane<Texture> for TextureLoaderLane {
    fn load(
        &self,
        bytes: &[u8],
    ) -> Result<Texture, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Texture::from_rgba8(width, height, rgba_img.into_raw())
            .ok_or_else(|| LoadError::BadDimensions { width, height }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_png_decodes_to_rgba8() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(2, 1, Rgba([200, 100, 50, 0]));

        let texture = TextureLoaderLane.load(&png_bytes(&img)).unwrap();
        assert_eq!((texture.width(), texture.height()), (3, 2));
        assert_eq!(&texture.pixels()[..4], &[10, 20, 30, 255]);
        assert_eq!(&texture.pixels()[20..24], &[200, 100, 50, 0]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(TextureLoaderLane.load(b"definitely not a png").is_err());
        assert!(TextureLoaderLane.load(&[]).is_err());
    }
}
