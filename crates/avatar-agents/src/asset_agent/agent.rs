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

//! The AssetAgent fetches asset bytes from a source and decodes them through
//! the registered loader lanes.

use std::sync::Arc;

use avatar_core::{
    asset::{Asset, AssetHandle},
    renderer::{Mesh, Texture},
};
use avatar_lanes::asset_lane::{AssetLoaderLane, ObjLoaderLane, TextureLoaderLane};

use super::{error::AssetError, loader::AssetLoaderLaneRegistry, source::AssetSource};

/// Fetches and decodes the meshes and textures of one render.
///
/// Every failure is returned to the caller; nothing is retried and nothing
/// is cached between agents.
pub struct AssetAgent {
    source: Arc<dyn AssetSource>,
    loaders: AssetLoaderLaneRegistry,
}

impl AssetAgent {
    /// Creates an agent reading from `source`, with the OBJ and texture lanes registered.
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        let mut agent = Self {
            source,
            loaders: AssetLoaderLaneRegistry::new(),
        };
        agent.register_loader::<Mesh>("mesh", ObjLoaderLane);
        agent.register_loader::<Texture>("texture", TextureLoaderLane);
        agent
    }

    /// Registers an `AssetLoaderLane` for a specific asset type.
    pub fn register_loader<A: Asset>(
        &mut self,
        kind: &'static str,
        loader: impl AssetLoaderLane<A> + 'static,
    ) {
        self.loaders.register::<A>(kind, loader);
    }

    /// Returns the raw bytes at `url`.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        self.source.fetch(url)
    }

    /// Fetches `url` and decodes it into an asset of type `A`.
    pub fn load<A: Asset>(&self, url: &str) -> Result<A, AssetError> {
        let bytes = self.fetch(url)?;
        self.loaders
            .load::<A>(&bytes)
            .map_err(|e| AssetError::Decode {
                url: url.to_string(),
                kind: self.loaders.kind_of::<A>(),
                reason: format!("{e:#}"),
            })
    }

    /// Fetches and decodes an OBJ mesh.
    pub fn load_mesh(&self, url: &str) -> Result<Mesh, AssetError> {
        let mesh = self.load::<Mesh>(url)?;
        log::debug!("Loaded mesh {url}: {} triangles", mesh.triangle_count());
        Ok(mesh)
    }

    /// Fetches and decodes a texture.
    pub fn load_texture(&self, url: &str) -> Result<AssetHandle<Texture>, AssetError> {
        let texture = self.load::<Texture>(url)?;
        log::debug!(
            "Loaded texture {url}: {}x{}",
            texture.width(),
            texture.height()
        );
        Ok(AssetHandle::new(texture))
    }
}
