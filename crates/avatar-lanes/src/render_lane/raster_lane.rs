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

//! The CPU triangle rasterizer.

use super::{
    clipping::{clip_triangle, ClipVertex},
    framebuffer::Framebuffer,
    shader::{Fragment, PhongShader},
    RenderLane, RenderStats,
};
use avatar_core::{
    error::RenderError,
    math::{Vec2, Vec3},
    renderer::{Scene, SceneObject, Texture},
};

/// A projected vertex in sample-grid coordinates.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    /// Position on the sample grid, y pointing down.
    xy: Vec2,
    /// Depth in `[0, 1]`.
    depth: f32,
    /// `1 / w`, used for perspective-correct interpolation.
    inv_w: f32,
    /// Attributes pre-divided by `w`.
    world: Vec3,
    normal: Vec3,
    tex_coord: Vec2,
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Rasterizes a scene with depth testing, back-face culling and Phong shading.
///
/// Triangles are processed strictly in scene order, one at a time, so the
/// same scene and shader always produce the same framebuffer contents.
#[derive(Debug, Clone, Copy)]
pub struct RasterLane {
    /// Discards triangles whose projected winding is clockwise.
    pub cull_back_faces: bool,
}

impl Default for RasterLane {
    fn default() -> Self {
        Self {
            cull_back_faces: true,
        }
    }
}

impl RasterLane {
    /// Creates a lane with back-face culling enabled.
    pub fn new() -> Self {
        Self::default()
    }

    fn project(&self, v: &ClipVertex, framebuffer: &Framebuffer) -> ScreenVertex {
        let inv_w = 1.0 / v.clip.w;
        let (ndc_x, ndc_y) = (v.clip.x * inv_w, v.clip.y * inv_w);
        let (w, h) = (framebuffer.render_width() as f32, framebuffer.render_height() as f32);
        ScreenVertex {
            xy: Vec2::new((ndc_x + 1.0) * 0.5 * w, (1.0 - ndc_y) * 0.5 * h),
            depth: v.clip.z * inv_w,
            inv_w,
            world: v.world * inv_w,
            normal: v.normal * inv_w,
            tex_coord: v.tex_coord * inv_w,
        }
    }

    fn draw_object(
        &self,
        object: &SceneObject,
        shader: &PhongShader,
        framebuffer: &mut Framebuffer,
        stats: &mut RenderStats,
    ) -> Result<(), RenderError> {
        let mesh = &object.mesh;
        if !mesh.indices_in_bounds() {
            return Err(RenderError::InvalidMesh {
                part: object.part.to_string(),
                reason: "index out of range".to_string(),
            });
        }
        let texture = object.texture.as_deref();

        for [a, b, c] in mesh.triangles() {
            stats.triangles += 1;
            let triangle = [a, b, c].map(|i| {
                let v = mesh.vertex(i);
                ClipVertex {
                    clip: shader.view_projection.transform_point4(v.position),
                    world: v.position,
                    normal: v.normal,
                    tex_coord: v.tex_coord,
                }
            });

            let polygon = clip_triangle(triangle);
            if polygon.is_empty() {
                stats.clipped += 1;
                continue;
            }

            let projected: Vec<ScreenVertex> =
                polygon.iter().map(|v| self.project(v, framebuffer)).collect();
            for i in 1..projected.len() - 1 {
                let tri = [projected[0], projected[i], projected[i + 1]];
                let area = edge(tri[0].xy, tri[1].xy, tri[2].xy);
                // The y flip turns counter-clockwise NDC triangles clockwise.
                if area == 0.0 || (self.cull_back_faces && area > 0.0) {
                    stats.culled += 1;
                    continue;
                }
                stats.fragments +=
                    self.fill_triangle(&tri, area, object, texture, shader, framebuffer);
            }
        }
        Ok(())
    }

    fn fill_triangle(
        &self,
        tri: &[ScreenVertex; 3],
        area: f32,
        object: &SceneObject,
        texture: Option<&Texture>,
        shader: &PhongShader,
        framebuffer: &mut Framebuffer,
    ) -> u64 {
        let (w, h) = (framebuffer.render_width(), framebuffer.render_height());
        let min_x = tri.iter().map(|v| v.xy.x).fold(f32::INFINITY, f32::min);
        let max_x = tri.iter().map(|v| v.xy.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = tri.iter().map(|v| v.xy.y).fold(f32::INFINITY, f32::min);
        let max_y = tri.iter().map(|v| v.xy.y).fold(f32::NEG_INFINITY, f32::max);

        if max_x < 0.0 || max_y < 0.0 || min_x >= w as f32 || min_y >= h as f32 {
            return 0;
        }
        let x0 = min_x.max(0.0).floor() as u32;
        let y0 = min_y.max(0.0).floor() as u32;
        let x1 = (max_x.ceil() as u32).min(w - 1);
        let y1 = (max_y.ceil() as u32).min(h - 1);

        let inv_area = 1.0 / area;
        let mut shaded = 0;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let b0 = edge(tri[1].xy, tri[2].xy, p) * inv_area;
                let b1 = edge(tri[2].xy, tri[0].xy, p) * inv_area;
                let b2 = edge(tri[0].xy, tri[1].xy, p) * inv_area;
                if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                    continue;
                }

                let depth = b0 * tri[0].depth + b1 * tri[1].depth + b2 * tri[2].depth;
                if !(0.0..=1.0).contains(&depth) || !framebuffer.depth_test(x, y, depth) {
                    continue;
                }

                let inv_w = b0 * tri[0].inv_w + b1 * tri[1].inv_w + b2 * tri[2].inv_w;
                let wp = 1.0 / inv_w;
                let fragment = Fragment {
                    position: (tri[0].world * b0 + tri[1].world * b1 + tri[2].world * b2) * wp,
                    normal: ((tri[0].normal * b0 + tri[1].normal * b1 + tri[2].normal * b2) * wp)
                        .normalize(),
                    tex_coord: (tri[0].tex_coord * b0
                        + tri[1].tex_coord * b1
                        + tri[2].tex_coord * b2)
                        * wp,
                };

                let color = shader.shade(&fragment, object.color, texture);
                framebuffer.write(x, y, depth, color);
                shaded += 1;
            }
        }
        shaded
    }
}

impl RenderLane for RasterLane {
    fn strategy_name(&self) -> &'static str {
        "CpuPhongRaster"
    }

    fn render(
        &self,
        scene: &Scene,
        shader: &PhongShader,
        framebuffer: &mut Framebuffer,
    ) -> Result<RenderStats, RenderError> {
        let mut stats = RenderStats::default();
        for object in scene.objects() {
            self.draw_object(object, shader, framebuffer, &mut stats)?;
        }
        log::debug!(
            "{}: {} triangles, {} culled, {} clipped, {} fragments",
            self.strategy_name(),
            stats.triangles,
            stats.culled,
            stats.clipped,
            stats.fragments
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_lane::fit_camera;
    use avatar_core::{
        asset::AssetHandle,
        avatar::BodyPart,
        math::{Mat4, Rgba, Vec2},
        renderer::{CameraSettings, Mesh, ShaderSettings},
    };

    /// A unit quad in the z = 0 plane facing +Z.
    fn quad(z: f32, color: Rgba) -> SceneObject {
        let positions = vec![
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ];
        let uvs = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut mesh = Mesh::new(positions, None, Some(uvs), vec![0, 1, 2, 0, 2, 3]);
        mesh.smooth_normals();
        SceneObject {
            part: BodyPart::Torso,
            mesh,
            color,
            texture: None,
        }
    }

    fn front_camera() -> CameraSettings {
        CameraSettings {
            eye: Vec3::new(0.0, 0.0, 5.0),
            center: Vec3::ZERO,
            ..Default::default()
        }
    }

    fn flat_shader(view_projection: Mat4) -> PhongShader {
        let settings = ShaderSettings {
            ambient: Rgba::WHITE,
            diffuse: Rgba::BLACK,
            ..Default::default()
        };
        PhongShader::new(&settings, view_projection, Vec3::new(0.0, 0.0, 5.0))
    }

    fn render(scene: &Scene, camera: &CameraSettings, size: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(size, size, 1).unwrap();
        let vp = camera.view_projection_matrix(1.0).unwrap();
        RasterLane::new().render(scene, &flat_shader(vp), &mut fb).unwrap();
        fb
    }

    #[test]
    fn test_front_facing_quad_covers_center() {
        let mut scene = Scene::new();
        scene.add(quad(0.0, Rgba::rgb(1.0, 0.0, 0.0)));
        let fb = render(&scene, &front_camera(), 16);

        assert_eq!(fb.color_at(8, 8).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(fb.color_at(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_back_faces_are_culled() {
        let mut scene = Scene::new();
        scene.add(quad(0.0, Rgba::WHITE));
        let behind = CameraSettings {
            eye: Vec3::new(0.0, 0.0, -5.0),
            ..front_camera()
        };
        let fb = render(&scene, &behind, 16);
        assert_eq!(fb.color_at(8, 8), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_depth_test_keeps_nearest_regardless_of_order() {
        let near = quad(0.5, Rgba::rgb(0.0, 1.0, 0.0));
        let far = quad(0.0, Rgba::rgb(0.0, 0.0, 1.0));

        for order in [[near.clone(), far.clone()], [far.clone(), near.clone()]] {
            let mut scene = Scene::new();
            for object in order {
                scene.add(object);
            }
            let fb = render(&scene, &front_camera(), 16);
            assert_eq!(fb.color_at(8, 8).to_rgba8(), [0, 255, 0, 255]);
        }
    }

    #[test]
    fn test_geometry_crossing_near_plane_is_clipped_not_dropped() {
        let close = CameraSettings {
            eye: Vec3::new(0.0, 0.0, 0.05),
            z_near: 0.1,
            ..front_camera()
        };
        // A floor quad running under the camera, crossing the near plane.
        let mut floor = quad(0.0, Rgba::WHITE);
        floor.mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, -0.1, 1.0),
                Vec3::new(1.0, -0.1, 1.0),
                Vec3::new(1.0, -0.1, -1.0),
                Vec3::new(-1.0, -0.1, -1.0),
            ],
            None,
            None,
            vec![0, 1, 2, 0, 2, 3],
        );
        let mut scene = Scene::new();
        scene.add(floor);
        let mut fb = Framebuffer::new(16, 16, 1).unwrap();
        let vp = close.view_projection_matrix(1.0).unwrap();
        let stats = RasterLane::new().render(&scene, &flat_shader(vp), &mut fb).unwrap();
        assert!(stats.fragments > 0);
        assert!(fb.color_at(8, 15).a > 0.0);
    }

    #[test]
    fn test_texture_is_sampled() {
        let mut object = quad(0.0, Rgba::rgb(1.0, 0.0, 0.0));
        object.texture = Some(AssetHandle::new(Texture::solid(Rgba::rgb(0.0, 0.0, 1.0))));
        let mut scene = Scene::new();
        scene.add(object);
        let fb = render(&scene, &front_camera(), 8);
        assert_eq!(fb.color_at(4, 4).to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let mut scene = Scene::new();
        scene.add(quad(0.0, Rgba::rgb(0.3, 0.6, 0.9)));
        scene.add(quad(0.25, Rgba::rgb(0.9, 0.1, 0.2)));
        let fitted = fit_camera(
            &scene.bounds().unwrap(),
            &CameraSettings::default(),
            1.0,
            0.0,
        )
        .unwrap();

        let run = || {
            let mut fb = Framebuffer::new(24, 24, 3).unwrap();
            let shader = PhongShader::new(
                &ShaderSettings::default(),
                fitted.view_projection,
                fitted.camera.eye,
            );
            RasterLane::new().render(&scene, &shader, &mut fb).unwrap();
            fb.resolve().into_raw()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let mut object = quad(0.0, Rgba::WHITE);
        object.mesh.indices.push(99);
        object.mesh.indices.push(0);
        object.mesh.indices.push(1);
        let mut scene = Scene::new();
        scene.add(object);
        let mut fb = Framebuffer::new(4, 4, 1).unwrap();
        let result = RasterLane::new().render(&scene, &flat_shader(Mat4::IDENTITY), &mut fb);
        assert!(matches!(result, Err(RenderError::InvalidMesh { .. })));
    }
}
