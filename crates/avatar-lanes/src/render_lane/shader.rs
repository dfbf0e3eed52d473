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

//! Per-fragment Phong shading.

use avatar_core::{
    math::{Mat4, Rgba, Vec2, Vec3},
    renderer::{DirectionalLight, SamplerDescriptor, ShaderSettings, Texture},
};

/// The surface attributes interpolated at one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// World-space position.
    pub position: Vec3,
    /// World-space unit normal.
    pub normal: Vec3,
    /// Texture coordinate.
    pub tex_coord: Vec2,
}

/// A Phong shader with a single directional light.
///
/// The base color of an object is blended under its texture by the texel's
/// alpha, then lit by `ambient + diffuse * max(n · l, 0)` plus an optional
/// specular term. The result is clamped to white and keeps the base color's
/// alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongShader {
    /// Transforms world positions into clip space.
    pub view_projection: Mat4,
    /// World-space camera position, used by the specular term.
    pub camera_position: Vec3,
    /// The key light.
    pub light: DirectionalLight,
    /// Ambient term.
    pub ambient: Rgba,
    /// Diffuse term.
    pub diffuse: Rgba,
    /// Specular term.
    pub specular: Rgba,
    /// Specular exponent; zero disables specular highlights.
    pub specular_power: f32,
    /// How textures are sampled.
    pub sampler: SamplerDescriptor,
}

impl PhongShader {
    /// Creates a shader from its settings and a camera.
    pub fn new(settings: &ShaderSettings, view_projection: Mat4, camera_position: Vec3) -> Self {
        Self {
            view_projection,
            camera_position,
            light: settings.light(),
            ambient: settings.ambient,
            diffuse: settings.diffuse,
            specular: settings.specular,
            specular_power: settings.specular_power,
            sampler: SamplerDescriptor::default(),
        }
    }

    /// Points the shader at a different camera.
    pub fn set_camera(&mut self, view_projection: Mat4, camera_position: Vec3) {
        self.view_projection = view_projection;
        self.camera_position = camera_position;
    }

    /// Computes the final straight-alpha color of a fragment.
    pub fn shade(&self, fragment: &Fragment, base_color: Rgba, texture: Option<&Texture>) -> Rgba {
        let mut color = base_color;
        if let Some(texture) = texture {
            let sample = texture.sample(fragment.tex_coord, &self.sampler);
            if sample.a > 0.0 {
                let texel = Rgba::new(
                    sample.r / sample.a,
                    sample.g / sample.a,
                    sample.b / sample.a,
                    1.0,
                );
                color = Rgba::lerp(color, texel, sample.a);
            }
        }

        let to_light = self.light.to_light();
        let n_dot_l = fragment.normal.dot(to_light).max(0.0);
        let mut light = self.ambient + self.diffuse * self.light.color * n_dot_l;

        if n_dot_l > 0.0 && self.specular_power > 0.0 {
            let to_camera = (self.camera_position - fragment.position).normalize();
            let reflected = (-to_light).reflect(fragment.normal);
            let highlight = to_camera.dot(reflected).max(0.0).powf(self.specular_power);
            light = light + self.specular * self.light.color * highlight;
        }

        (color * light).min(Rgba::WHITE).with_alpha(color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_core::math::approx_eq;

    fn shader() -> PhongShader {
        PhongShader::new(&ShaderSettings::default(), Mat4::IDENTITY, Vec3::new(0.0, 0.0, 5.0))
    }

    fn facing(normal: Vec3) -> Fragment {
        Fragment {
            position: Vec3::ZERO,
            normal,
            tex_coord: Vec2::new(0.5, 0.5),
        }
    }

    #[test]
    fn test_unlit_side_gets_only_ambient() {
        let s = shader();
        let away = -s.light.to_light();
        let c = s.shade(&facing(away), Rgba::WHITE, None);
        assert!(approx_eq(c.r, 0xAA as f32 / 255.0));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_lit_side_clamps_to_white() {
        let s = shader();
        // Ambient 0xAA plus full diffuse 0x77 exceeds 1.0.
        let c = s.shade(&facing(s.light.to_light()), Rgba::WHITE, None);
        assert_eq!(c, Rgba::WHITE);
    }

    #[test]
    fn test_base_color_modulates_light() {
        let s = shader();
        let away = -s.light.to_light();
        let c = s.shade(&facing(away), Rgba::rgb(0.5, 0.0, 1.0), None);
        assert!(approx_eq(c.r, 0.5 * 0xAA as f32 / 255.0));
        assert!(approx_eq(c.g, 0.0));
    }

    #[test]
    fn test_opaque_texture_replaces_base_color() {
        let s = shader();
        let away = -s.light.to_light();
        let texture = Texture::solid(Rgba::rgb(0.0, 1.0, 0.0));
        let c = s.shade(&facing(away), Rgba::rgb(1.0, 0.0, 0.0), Some(&texture));
        assert!(approx_eq(c.r, 0.0));
        assert!(approx_eq(c.g, 0xAA as f32 / 255.0));
    }

    #[test]
    fn test_transparent_texture_keeps_base_color() {
        let s = shader();
        let away = -s.light.to_light();
        let texture = Texture::solid(Rgba::TRANSPARENT);
        let plain = s.shade(&facing(away), Rgba::rgb(1.0, 0.0, 0.0), None);
        let textured = s.shade(&facing(away), Rgba::rgb(1.0, 0.0, 0.0), Some(&texture));
        assert_eq!(plain, textured);
    }

    #[test]
    fn test_specular_only_when_enabled() {
        let settings = ShaderSettings {
            ambient: Rgba::BLACK,
            diffuse: Rgba::BLACK,
            specular_power: 4.0,
            light_direction: Vec3::new(0.0, 0.0, -1.0),
            ..Default::default()
        };
        let mut s = PhongShader::new(&settings, Mat4::IDENTITY, Vec3::new(0.0, 0.0, 5.0));
        let c = s.shade(&facing(Vec3::Z), Rgba::WHITE, None);
        assert_eq!(c, Rgba::WHITE);

        s.specular_power = 0.0;
        let c = s.shade(&facing(Vec3::Z), Rgba::WHITE, None);
        assert_eq!(c.with_alpha(0.0), Rgba::TRANSPARENT);
    }
}
