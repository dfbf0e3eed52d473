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

//! Defines the scene handed to the rasterizer.

use super::{mesh::Mesh, texture::Texture};
use crate::{
    asset::AssetHandle,
    avatar::BodyPart,
    math::{Aabb, Rgba},
};

/// One colored, optionally textured mesh.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// The body part this object draws.
    pub part: BodyPart,
    /// The geometry, in world space.
    pub mesh: Mesh,
    /// Base color, blended under the texture.
    pub color: Rgba,
    /// Texture drawn over `color`, if any.
    pub texture: Option<AssetHandle<Texture>>,
}

/// An ordered collection of scene objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object; draw order follows insertion order.
    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// The objects in draw order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Returns the object drawing `part`, if present.
    pub fn object(&self, part: BodyPart) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.part == part)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total number of triangles across all objects.
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }

    /// The combined bounding box of every object with geometry.
    ///
    /// Returns `None` when no object has any vertex.
    pub fn bounds(&self) -> Option<Aabb> {
        let merged = self
            .objects
            .iter()
            .map(|o| o.mesh.bounding_box)
            .filter(Aabb::is_valid)
            .fold(Aabb::INVALID, |acc, b| acc.merge(&b));
        merged.is_valid().then_some(merged)
    }
}
