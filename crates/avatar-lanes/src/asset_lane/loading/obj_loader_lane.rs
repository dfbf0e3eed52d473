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

//! Defines a lane for loading OBJ mesh assets.

use crate::asset_lane::{AssetLoaderLane, LoadError};
use ahash::AHashMap;
use anyhow::Context;
use avatar_core::{
    math::{Vec2, Vec3},
    renderer::Mesh,
};
use std::error::Error;

/// Lane for loading OBJ mesh assets.
///
/// Faces are triangulated and vertices are re-indexed so that positions,
/// normals and texture coordinates share one index buffer. All objects and
/// groups in the file are merged into a single mesh. Material libraries are
/// ignored; color and texture come from the avatar instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoaderLane;

impl AssetLoaderLane<Mesh> for ObjLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<Mesh, Box<dyn Error + Send + Sync>> {
        let obj_text = std::str::from_utf8(bytes).context("OBJ file is not valid UTF-8")?;

        let (models, _materials) = tobj::load_obj_buf(
            &mut std::io::Cursor::new(obj_text),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            |_| Ok((Vec::new(), AHashMap::new())),
        )
        .context("Failed to parse OBJ file")?;

        if models.iter().all(|m| m.mesh.positions.is_empty()) {
            return Err(LoadError::NoGeometry.into());
        }

        let has_normals = models.iter().any(|m| !m.mesh.normals.is_empty());
        let has_tex_coords = models.iter().any(|m| !m.mesh.texcoords.is_empty());

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();
        let mut indices = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let base = u32::try_from(positions.len()).context("OBJ file has too many vertices")?;
            let vertex_count = mesh.positions.len() / 3;

            positions.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|v| Vec3::new(v[0], v[1], v[2])),
            );

            // Models without an attribute are padded so every attribute
            // stays aligned with `positions`.
            if has_normals {
                if mesh.normals.len() == mesh.positions.len() {
                    normals.extend(
                        mesh.normals
                            .chunks_exact(3)
                            .map(|n| Vec3::new(n[0], n[1], n[2])),
                    );
                } else {
                    normals.extend(std::iter::repeat(Vec3::ZERO).take(vertex_count));
                }
            }
            if has_tex_coords {
                if mesh.texcoords.len() / 2 == vertex_count {
                    tex_coords.extend(
                        mesh.texcoords
                            .chunks_exact(2)
                            .map(|t| Vec2::new(t[0], t[1])),
                    );
                } else {
                    tex_coords.extend(std::iter::repeat(Vec2::ZERO).take(vertex_count));
                }
            }

            indices.extend(mesh.indices.iter().map(|&i| base + i));
        }

        let mesh = Mesh::new(
            positions,
            has_normals.then_some(normals),
            has_tex_coords.then_some(tex_coords),
            indices,
        );

        if !mesh.indices_in_bounds() {
            return Err(LoadError::IndexOutOfRange.into());
        }

        log::trace!(
            "Decoded OBJ: {} objects, {} vertices, {} triangles",
            models.len(),
            mesh.positions.len(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
o Quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn test_quad_is_triangulated_with_uvs() {
        let mesh = ObjLoaderLane.load(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.normals.is_none());
        let uvs = mesh.tex_coords.as_ref().unwrap();
        assert_eq!(uvs.len(), 4);
        assert_eq!(mesh.bounding_box.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_multiple_objects_are_merged() {
        let text = "\
o A
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o B
v 0 0 5
v 1 0 5
v 0 1 5
f 4 5 6
";
        let mesh = ObjLoaderLane.load(text.as_bytes()).unwrap();
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.indices_in_bounds());
        assert_eq!(mesh.bounding_box.max.z, 5.0);
        // Second triangle references the second object's vertices.
        let second: Vec<_> = mesh.triangles().nth(1).unwrap().to_vec();
        assert!(second.iter().all(|&i| mesh.positions[i as usize].z == 5.0));
    }

    #[test]
    fn test_invalid_payloads_are_rejected() {
        assert!(ObjLoaderLane.load(&[0xff, 0xfe, 0x00]).is_err());
        let err = ObjLoaderLane.load(b"# only a comment\n").unwrap_err();
        assert_eq!(err.downcast_ref::<LoadError>(), Some(&LoadError::NoGeometry));
        assert!(ObjLoaderLane.load(b"<html>404 Not Found</html>").is_err());
    }
}
