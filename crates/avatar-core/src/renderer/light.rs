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

//! Defines the light used by the Phong shader.

use crate::math::{Rgba, Vec3};

/// A directional light source that illuminates from a uniform direction.
///
/// Directional lights simulate infinitely distant light sources like the sun.
/// They have no position, only a direction, and cast parallel rays with no falloff.
///
/// # Examples
///
/// ```
/// use avatar_core::renderer::light::DirectionalLight;
/// use avatar_core::math::Vec3;
///
/// let key = DirectionalLight::default();
/// // The surface-to-light vector used for diffuse shading.
/// let l = key.to_light();
/// assert!(l.dot(Vec3::Y) > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The direction the light is pointing (normalized).
    ///
    /// This vector points from the light source towards the scene.
    pub direction: Vec3,

    /// The color the light multiplies into the diffuse and specular terms.
    pub color: Rgba,
}

impl DirectionalLight {
    /// Creates a white light travelling along `direction`.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            color: Rgba::WHITE,
        }
    }

    /// Returns the unit vector from a surface toward the light.
    #[inline]
    pub fn to_light(&self) -> Vec3 {
        -self.direction
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        // Key light up and behind the camera's left shoulder, aimed at the origin.
        Self::new(Vec3::new(4.0, -6.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_light_points_from_key_position_to_origin() {
        let light = DirectionalLight::default();
        assert_abs_diff_eq!(light.to_light(), Vec3::new(-4.0, 6.0, 0.0).normalize());
        assert_abs_diff_eq!(light.direction.length(), 1.0, epsilon = 1e-6);
        assert_eq!(light.color, Rgba::WHITE);
    }
}
