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

//! Builds the scene for one avatar.

use crate::{
    asset_agent::{AssetAgent, AssetSettings, FaceId, FaceResolver, FaceTexture},
    error::AgentError,
};
use avatar_core::{
    avatar::{Avatar, BodyPart, TextureSlot},
    renderer::{Scene, SceneObject},
};

/// Pairs each body part's mesh with its color and texture.
pub struct SceneAssembler<'a> {
    assets: &'a AssetAgent,
    settings: &'a AssetSettings,
}

impl<'a> SceneAssembler<'a> {
    /// Creates an assembler fetching through `assets`.
    pub fn new(assets: &'a AssetAgent, settings: &'a AssetSettings) -> Self {
        Self { assets, settings }
    }

    /// Assembles the six body parts of `avatar`, in [`BodyPart::ALL`] order.
    ///
    /// Torso and arms wear the template as a shirt, legs wear it as pants and
    /// the head wears the resolved face. Every mesh gets smoothed normals.
    pub fn assemble(&self, avatar: &Avatar) -> Result<Scene, AgentError> {
        // Colors first so a bad descriptor fails before any download.
        let colors = BodyPart::ALL
            .iter()
            .map(|&part| avatar.color(part))
            .collect::<Result<Vec<_>, _>>()?;

        let face_id = FaceId::from_items(&avatar.items)?;
        let template = self.assets.load_texture(&self.settings.template_url())?;
        let face = FaceResolver::new(self.assets, self.settings).resolve(face_id)?;
        if let FaceTexture::Missing(id) = &face {
            log::debug!("Head drawn without face texture for item {id}");
        }

        let mut scene = Scene::new();
        for (&part, color) in BodyPart::ALL.iter().zip(colors) {
            let mut mesh = self.assets.load_mesh(&self.settings.mesh_url(part))?;
            mesh.smooth_normals();

            let texture = match part.texture_slot() {
                TextureSlot::Shirt | TextureSlot::Pants => Some(template.clone()),
                TextureSlot::Face => face.texture().cloned(),
            };

            scene.add(SceneObject {
                part,
                mesh,
                color,
                texture,
            });
        }

        log::debug!(
            "Assembled scene: {} objects, {} triangles",
            scene.len(),
            scene.triangle_count()
        );
        Ok(scene)
    }
}
