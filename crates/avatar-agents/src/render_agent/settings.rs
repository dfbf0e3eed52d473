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

//! Parameters of the render pass.

use avatar_core::{
    error::RenderError,
    renderer::{CameraSettings, ShaderSettings},
};
use serde::{Deserialize, Serialize};

/// Camera, shading and sampling parameters for every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// The camera before auto-fit.
    pub camera: CameraSettings,
    /// The Phong terms.
    pub shader: ShaderSettings,
    /// Supersampling factor per axis.
    pub scale: u32,
    /// Fractional padding left around the scene by the auto-fit.
    pub fit_margin: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            shader: ShaderSettings::default(),
            scale: 3,
            fit_margin: 0.0,
        }
    }
}

impl RenderSettings {
    /// Checks every parameter once, before any render.
    pub fn validate(&self) -> Result<(), RenderError> {
        self.camera.validate()?;
        self.shader.validate()?;
        if self.scale == 0 {
            return Err(RenderError::InvalidScale);
        }
        if !(self.fit_margin >= 0.0 && self.fit_margin.is_finite()) {
            return Err(RenderError::InvalidCamera(format!(
                "fit margin must be a non-negative number, got {}",
                self.fit_margin
            )));
        }
        Ok(())
    }
}
