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

//! Clip-space polygon clipping against the depth planes.

use avatar_core::math::{Vec2, Vec3, Vec4};

/// A vertex after the vertex stage, carrying the attributes to interpolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVertex {
    /// Homogeneous clip-space position.
    pub clip: Vec4,
    /// World-space position.
    pub world: Vec3,
    /// World-space normal.
    pub normal: Vec3,
    /// Texture coordinate.
    pub tex_coord: Vec2,
}

impl ClipVertex {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            clip: a.clip + (b.clip - a.clip) * t,
            world: a.world + (b.world - a.world) * t,
            normal: a.normal + (b.normal - a.normal) * t,
            tex_coord: a.tex_coord + (b.tex_coord - a.tex_coord) * t,
        }
    }
}

/// Signed distance of a vertex to the near plane (`z >= 0`).
#[inline]
fn near_distance(v: &ClipVertex) -> f32 {
    v.clip.z
}

/// Signed distance of a vertex to the far plane (`z <= w`).
#[inline]
fn far_distance(v: &ClipVertex) -> f32 {
    v.clip.w - v.clip.z
}

fn clip_against(input: &[ClipVertex], distance: fn(&ClipVertex) -> f32) -> Vec<ClipVertex> {
    let mut output = Vec::with_capacity(input.len() + 2);
    for (i, current) in input.iter().enumerate() {
        let next = &input[(i + 1) % input.len()];
        let (dc, dn) = (distance(current), distance(next));

        if dc >= 0.0 {
            output.push(*current);
        }
        if (dc >= 0.0) != (dn >= 0.0) {
            let t = dc / (dc - dn);
            output.push(ClipVertex::lerp(current, next, t));
        }
    }
    output
}

/// Clips a triangle against the near and far planes.
///
/// Returns the resulting convex polygon in the input winding order, or an
/// empty vector when the triangle lies entirely outside. Triangles already
/// inside are returned unchanged.
pub fn clip_triangle(triangle: [ClipVertex; 3]) -> Vec<ClipVertex> {
    let inside = |v: &ClipVertex| near_distance(v) >= 0.0 && far_distance(v) >= 0.0;
    if triangle.iter().all(inside) {
        return triangle.to_vec();
    }

    let polygon = clip_against(&triangle, near_distance);
    if polygon.len() < 3 {
        return Vec::new();
    }
    let polygon = clip_against(&polygon, far_distance);
    if polygon.len() < 3 {
        return Vec::new();
    }
    polygon
}
