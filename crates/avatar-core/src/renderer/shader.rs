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

//! Defines the Phong shading parameters.

use super::light::DirectionalLight;
use crate::{
    error::RenderError,
    math::{Rgba, Vec3, EPSILON},
};
use serde::{Deserialize, Serialize};

/// Material-independent Phong terms applied to every scene object.
///
/// Colors are hex strings when serialized (`"AAAAAA"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderSettings {
    /// Ambient term, added regardless of orientation.
    pub ambient: Rgba,
    /// Diffuse term, scaled by `max(n · l, 0)`.
    pub diffuse: Rgba,
    /// Specular term.
    pub specular: Rgba,
    /// Specular exponent. Zero disables the specular term.
    pub specular_power: f32,
    /// Direction the light travels, from the light into the scene.
    pub light_direction: Vec3,
}

impl Default for ShaderSettings {
    fn default() -> Self {
        Self {
            ambient: Rgba::rgb(0xAA as f32 / 255.0, 0xAA as f32 / 255.0, 0xAA as f32 / 255.0),
            diffuse: Rgba::rgb(0x77 as f32 / 255.0, 0x77 as f32 / 255.0, 0x77 as f32 / 255.0),
            specular: Rgba::WHITE,
            specular_power: 0.0,
            light_direction: DirectionalLight::default().direction,
        }
    }
}

impl ShaderSettings {
    /// Checks the light direction and the specular exponent.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.light_direction.is_finite()
            || self.light_direction.length_squared() < EPSILON * EPSILON
        {
            return Err(RenderError::InvalidShader(
                "light direction must be a non-zero vector".to_string(),
            ));
        }
        if !(self.specular_power >= 0.0 && self.specular_power.is_finite()) {
            return Err(RenderError::InvalidShader(
                "specular power must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the light described by `light_direction`.
    pub fn light(&self) -> DirectionalLight {
        DirectionalLight::new(self.light_direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hex_terms() {
        let shader = ShaderSettings::default();
        assert_eq!(shader.ambient, Rgba::from_hex("AAA").unwrap());
        assert_eq!(shader.diffuse, Rgba::from_hex("777").unwrap());
        assert_eq!(shader.specular_power, 0.0);
        assert!(shader.validate().is_ok());
    }

    #[test]
    fn test_deserialize_hex_terms() {
        let shader: ShaderSettings =
            serde_json::from_str(r##"{"ambient":"#202020","specular_power":8.0}"##).unwrap();
        assert_eq!(shader.ambient.to_hex(), "202020");
        assert_eq!(shader.specular_power, 8.0);
        assert_eq!(shader.diffuse, ShaderSettings::default().diffuse);
    }

    #[test]
    fn test_validate_rejects_zero_light() {
        let shader = ShaderSettings {
            light_direction: Vec3::ZERO,
            ..Default::default()
        };
        assert!(shader.validate().is_err());
    }
}
