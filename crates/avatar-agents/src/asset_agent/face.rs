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

//! Resolution of the head's face texture.

use super::{
    agent::AssetAgent,
    error::AssetError,
    settings::{AssetSettings, ASSET_URI_PREFIX},
};
use avatar_core::{asset::AssetHandle, renderer::Texture};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// A non-zero face item id from the avatar's `items.face` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceId(pub u64);

impl FaceId {
    /// Reads `items.face`.
    ///
    /// Absent, `null` and `0` mean "no face item" and yield `None`. Fractional
    /// numbers are truncated toward zero. Negative numbers and non-numeric
    /// values are errors.
    pub fn from_items(items: &Map<String, Value>) -> Result<Option<Self>, AssetError> {
        let value = match items.get("face") {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };
        let invalid = || AssetError::InvalidFaceId(value.to_string());

        let Value::Number(number) = value else {
            return Err(invalid());
        };
        let id = if let Some(id) = number.as_u64() {
            id
        } else {
            let float = number.as_f64().ok_or_else(invalid)?;
            if float < 0.0 || float >= u64::MAX as f64 {
                return Err(invalid());
            }
            float.trunc() as u64
        };

        Ok((id != 0).then_some(Self(id)))
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of face resolution.
#[derive(Debug, Clone)]
pub enum FaceTexture {
    /// The avatar wears no face item; the built-in face is used.
    Default(AssetHandle<Texture>),
    /// The face item's texture, fetched through the asset API.
    Item {
        /// The face item.
        id: FaceId,
        /// Its decoded texture.
        texture: AssetHandle<Texture>,
    },
    /// The asset API knows no texture for the item; the head is left untextured.
    Missing(FaceId),
}

impl FaceTexture {
    /// The texture to draw on the head, if any.
    pub fn texture(&self) -> Option<&AssetHandle<Texture>> {
        match self {
            FaceTexture::Default(texture) | FaceTexture::Item { texture, .. } => Some(texture),
            FaceTexture::Missing(_) => None,
        }
    }
}

/// One entry of the asset API's `getPoly` response.
#[derive(Debug, Deserialize)]
struct PolyAsset {
    #[serde(default)]
    texture: Option<String>,
}

/// Turns a face item id into a texture.
pub struct FaceResolver<'a> {
    assets: &'a AssetAgent,
    settings: &'a AssetSettings,
}

impl<'a> FaceResolver<'a> {
    /// Creates a resolver fetching through `assets`.
    pub fn new(assets: &'a AssetAgent, settings: &'a AssetSettings) -> Self {
        Self { assets, settings }
    }

    /// Resolves the face texture.
    ///
    /// With no face item the default face is loaded and the asset API is not
    /// contacted. Otherwise the item's metadata is looked up, its first entry's
    /// `asset://` texture reference is downloaded, and the result decoded.
    pub fn resolve(&self, face: Option<FaceId>) -> Result<FaceTexture, AssetError> {
        let Some(id) = face else {
            let texture = self.assets.load_texture(&self.settings.default_face_url())?;
            return Ok(FaceTexture::Default(texture));
        };

        let Some(asset_ref) = self.texture_ref(id)? else {
            log::warn!("Face item {id} has no asset metadata; rendering the head untextured");
            return Ok(FaceTexture::Missing(id));
        };

        let texture = self
            .assets
            .load_texture(&self.settings.asset_url(&asset_ref))?;
        Ok(FaceTexture::Item { id, texture })
    }

    /// Looks up the texture reference of a face item, stripped of its prefix.
    ///
    /// Returns `None` when the metadata array is empty.
    fn texture_ref(&self, id: FaceId) -> Result<Option<String>, AssetError> {
        let url = self.settings.poly_url(id.0);
        let body = self.assets.fetch(&url)?;

        let entries: Vec<PolyAsset> =
            serde_json::from_slice(&body).map_err(|e| AssetError::Metadata {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let Some(first) = entries.into_iter().next() else {
            return Ok(None);
        };
        let texture = first
            .texture
            .ok_or(AssetError::MissingTexture { item_id: id.0 })?;
        let stripped = texture
            .strip_prefix(ASSET_URI_PREFIX)
            .ok_or_else(|| AssetError::InvalidTextureRef(texture.clone()))?;

        Ok(Some(stripped.to_string()))
    }
}
