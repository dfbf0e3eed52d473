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

//! Defines the triangle mesh representation.

use crate::{
    asset::Asset,
    math::{Aabb, Vec2, Vec3},
};
use std::collections::HashMap;

/// A single vertex with every attribute resolved, as fed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// Object-space position.
    pub position: Vec3,
    /// Unit surface normal (zero when the mesh has none).
    pub normal: Vec3,
    /// Texture coordinate (zero when the mesh has none).
    pub tex_coord: Vec2,
}

/// An indexed triangle list.
///
/// Attributes are stored struct-of-arrays; `normals` and `tex_coords`, when
/// present, have exactly one entry per position.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals
    pub normals: Option<Vec<Vec3>>,
    /// Vertex texture coordinates
    pub tex_coords: Option<Vec<Vec2>>,
    /// Triangle indices, three per triangle
    pub indices: Vec<u32>,
    /// Axis-aligned bounding box of `positions`
    pub bounding_box: Aabb,
}

impl Asset for Mesh {}

impl Mesh {
    /// Builds a mesh and computes its bounding box.
    ///
    /// Trailing indices that do not form a whole triangle are dropped.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Option<Vec<Vec3>>,
        tex_coords: Option<Vec<Vec2>>,
        mut indices: Vec<u32>,
    ) -> Self {
        indices.truncate(indices.len() - indices.len() % 3);
        let bounding_box = Aabb::from_points(positions.iter().copied()).unwrap_or(Aabb::INVALID);
        Self {
            positions,
            normals,
            tex_coords,
            indices,
            bounding_box,
        }
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns the fully resolved vertex at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range for `positions`.
    #[inline]
    pub fn vertex(&self, index: u32) -> Vertex {
        let i = index as usize;
        Vertex {
            position: self.positions[i],
            normal: self
                .normals
                .as_ref()
                .and_then(|n| n.get(i).copied())
                .unwrap_or(Vec3::ZERO),
            tex_coord: self
                .tex_coords
                .as_ref()
                .and_then(|t| t.get(i).copied())
                .unwrap_or(Vec2::ZERO),
        }
    }

    /// Returns `true` if every index refers to an existing position.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.positions.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Replaces the vertex normals with smoothed ones.
    ///
    /// Every vertex gets the normalized sum of the unit face normals of all
    /// triangles touching its *position*, so seams where the OBJ splits
    /// vertices for texture coordinates still shade continuously.
    pub fn smooth_normals(&mut self) {
        let key = |p: Vec3| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        let mut sums: HashMap<[u32; 3], Vec3> = HashMap::with_capacity(self.positions.len());

        for [a, b, c] in self.triangles() {
            let (pa, pb, pc) = (
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            );
            let face = (pb - pa).cross(pc - pa).normalize();
            for p in [pa, pb, pc] {
                *sums.entry(key(p)).or_insert(Vec3::ZERO) += face;
            }
        }

        let normals = self
            .positions
            .iter()
            .map(|&p| sums.get(&key(p)).map_or(Vec3::ZERO, |n| n.normalize()))
            .collect();
        self.normals = Some(normals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Two triangles folded 90 degrees along the shared X axis edge, with the
    /// shared edge duplicated the way OBJ loaders split UV seams.
    fn folded_quad() -> Mesh {
        let positions = vec![
            // Floor triangle (normal +Y)
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            // Wall triangle (normal +Z), shared edge duplicated
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        Mesh::new(positions, None, None, vec![0, 1, 2, 3, 4, 5])
    }

    #[test]
    fn test_new_computes_bounds_and_drops_partial_triangles() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            None,
            None,
            vec![0, 1, 2, 0],
        );
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.bounding_box.min, Vec3::ZERO);
        assert_eq!(mesh.bounding_box.max, Vec3::new(1.0, 1.0, 0.0));
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn test_smooth_normals_average_across_split_vertices() {
        let mut mesh = folded_quad();
        mesh.smooth_normals();
        let normals = mesh.normals.as_ref().unwrap();

        let shared = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert_abs_diff_eq!(normals[0], shared);
        assert_abs_diff_eq!(normals[3], shared);
        assert_abs_diff_eq!(normals[2], shared);
        // Unshared corners keep their face normal.
        assert_abs_diff_eq!(normals[1], Vec3::Y);
        assert_abs_diff_eq!(normals[5], Vec3::Z);
    }

    #[test]
    fn test_vertex_defaults_missing_attributes() {
        let mesh = folded_quad();
        let v = mesh.vertex(4);
        assert_eq!(v.position, Vec3::X);
        assert_eq!(v.normal, Vec3::ZERO);
        assert_eq!(v.tex_coord, Vec2::ZERO);
    }
}
