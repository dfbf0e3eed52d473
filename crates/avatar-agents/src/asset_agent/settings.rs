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

//! Where assets live and how they are requested.

use avatar_core::avatar::BodyPart;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix of texture references returned by the asset API.
pub const ASSET_URI_PREFIX: &str = "asset://";

/// Hosts, paths and HTTP parameters for asset fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Base URL of the static content host serving meshes and templates.
    pub content_base: String,
    /// Base URL of the third-party asset API.
    pub asset_api_base: String,
    /// Path of the shirt/pants template texture on the content host.
    pub template_texture: String,
    /// Path of the default face texture on the content host.
    pub default_face_texture: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            content_base: "https://hawli.pages.dev".to_string(),
            asset_api_base: "https://api.brick-hill.com".to_string(),
            template_texture: "Template.png".to_string(),
            default_face_texture: "Face.png".to_string(),
            timeout_secs: 30,
            user_agent: concat!("avatar-render/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

impl AssetSettings {
    /// The HTTP timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL of a body part's OBJ mesh.
    pub fn mesh_url(&self, part: BodyPart) -> String {
        join(&self.content_base, &format!("obj/{}.obj", part.mesh_name()))
    }

    /// URL of the shirt/pants template texture.
    pub fn template_url(&self) -> String {
        join(&self.content_base, &self.template_texture)
    }

    /// URL of the face used when the avatar wears none.
    pub fn default_face_url(&self) -> String {
        join(&self.content_base, &self.default_face_texture)
    }

    /// URL of the asset API's metadata lookup for an item.
    pub fn poly_url(&self, item_id: u64) -> String {
        join(&self.asset_api_base, &format!("v1/assets/getPoly/1/{item_id}"))
    }

    /// URL of the asset API's download endpoint for an asset reference
    /// stripped of its `asset://` prefix.
    pub fn asset_url(&self, asset_ref: &str) -> String {
        join(&self.asset_api_base, &format!("v1/assets/get/{asset_ref}"))
    }
}
