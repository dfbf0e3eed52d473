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

//! The RenderAgent turns an assembled scene into an image.

use std::time::Instant;

use avatar_core::{error::RenderError, renderer::Scene};
use avatar_lanes::render_lane::{
    encode_png, fit_camera, Framebuffer, PhongShader, RasterLane, RenderLane,
};
use image::RgbaImage;

use super::settings::RenderSettings;

/// Frames, shades and rasterizes scenes through a [`RenderLane`].
pub struct RenderAgent {
    lane: Box<dyn RenderLane>,
    settings: RenderSettings,
}

impl RenderAgent {
    /// Creates an agent rendering with the CPU raster lane.
    pub fn new(settings: RenderSettings) -> Self {
        Self::with_lane(Box::new(RasterLane::new()), settings)
    }

    /// Creates an agent rendering with a custom lane.
    pub fn with_lane(lane: Box<dyn RenderLane>, settings: RenderSettings) -> Self {
        Self { lane, settings }
    }

    /// Renders `scene` into a `size` x `size` image.
    ///
    /// The camera is first fitted to the scene's bounds, then the scene is
    /// rasterized at the configured supersampling scale and downsampled.
    pub fn render(&self, scene: &Scene, size: u32) -> Result<RgbaImage, RenderError> {
        let started = Instant::now();
        let bounds = scene.bounds().ok_or(RenderError::EmptyScene)?;

        let mut framebuffer = Framebuffer::new(size, size, self.settings.scale)?;
        let fitted = fit_camera(
            &bounds,
            &self.settings.camera,
            framebuffer.aspect_ratio(),
            self.settings.fit_margin,
        )?;
        log::debug!(
            "Fitted camera: eye {:?}, center {:?}",
            fitted.camera.eye,
            fitted.camera.center
        );

        let shader = PhongShader::new(
            &self.settings.shader,
            fitted.view_projection,
            fitted.camera.eye,
        );
        self.lane.render(scene, &shader, &mut framebuffer)?;

        let image = framebuffer.resolve();
        log::debug!(
            "RenderAgent: {} rendered {size}x{size} at {}x in {:?}",
            self.lane.strategy_name(),
            self.settings.scale,
            started.elapsed()
        );
        Ok(image)
    }

    /// Renders `scene` and encodes the result as PNG.
    pub fn render_png(&self, scene: &Scene, size: u32) -> Result<Vec<u8>, RenderError> {
        encode_png(&self.render(scene, size)?)
    }
}

impl Default for RenderAgent {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}
