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

//! Handler configuration, loaded once at startup.
//!
//! Every field has a default, so an empty TOML file (or no file at all) is a
//! valid configuration. A few settings can also be overridden from the
//! environment; see [`ConfigOverrides`].

use crate::error::HandlerError;
use anyhow::Context;
use avatar_agents::{AssetSettings, RenderSettings};
use avatar_core::{
    avatar::DEFAULT_AVATAR_JSON,
    renderer::{CameraSettings, ShaderSettings},
    Avatar,
};
use avatar_lanes::render_lane::MAX_RENDER_DIMENSION;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Output size and sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Supersampling factor per axis.
    pub scale: u32,
    /// Fractional padding left around the avatar by the camera auto-fit.
    pub fit_margin: f32,
    /// Largest accepted `size` in a request.
    pub max_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 3,
            fit_margin: 0.0,
            max_size: 2048,
        }
    }
}

/// What to render when a request carries no avatar descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Descriptor substituted for a blank `avatarJSON`.
    pub default_descriptor: Option<String>,
    /// When false, a blank `avatarJSON` is an error even if a default exists.
    pub use_default_on_empty: bool,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            default_descriptor: Some(DEFAULT_AVATAR_JSON.to_string()),
            use_default_on_empty: true,
        }
    }
}

impl AvatarConfig {
    /// The descriptor to fall back to, if falling back is enabled.
    pub fn fallback(&self) -> Option<&str> {
        self.default_descriptor
            .as_deref()
            .filter(|_| self.use_default_on_empty)
    }
}

/// Settings taken from the command line or the environment, applied on top
/// of the loaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replaces `assets.content_base` (`AVATAR_CONTENT_BASE`).
    pub content_base: Option<String>,
    /// Replaces `assets.asset_api_base` (`AVATAR_ASSET_API_BASE`).
    pub asset_api_base: Option<String>,
    /// Replaces `render.scale` (`AVATAR_RENDER_SCALE`).
    pub scale: Option<u32>,
}

/// The complete configuration of a [`Handler`](crate::Handler).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Asset hosts and HTTP parameters.
    pub assets: AssetSettings,
    /// The camera before auto-fit.
    pub camera: CameraSettings,
    /// Phong shading terms.
    pub shader: ShaderSettings,
    /// Output size and sampling.
    pub render: RenderConfig,
    /// Fallback avatar.
    pub avatar: AvatarConfig,
}

impl HandlerConfig {
    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HandlerError> {
        Self::read(path.as_ref()).map_err(|e| HandlerError::Config(format!("{e:#}")))
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies the overrides that are set.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(base) = &overrides.content_base {
            log::debug!("Overriding content base with '{base}'");
            self.assets.content_base = base.clone();
        }
        if let Some(base) = &overrides.asset_api_base {
            log::debug!("Overriding asset API base with '{base}'");
            self.assets.asset_api_base = base.clone();
        }
        if let Some(scale) = overrides.scale {
            log::debug!("Overriding render scale with {scale}");
            self.render.scale = scale;
        }
    }

    /// The parameters handed to the render agent.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            camera: self.camera,
            shader: self.shader,
            scale: self.render.scale,
            fit_margin: self.render.fit_margin,
        }
    }

    /// Checks the whole configuration, including the fallback descriptor.
    pub fn validate(&self) -> Result<(), HandlerError> {
        let invalid = |reason: String| Err(HandlerError::Config(reason));

        self.render_settings()
            .validate()
            .map_err(|e| HandlerError::Config(e.to_string()))?;

        if self.render.max_size == 0 {
            return invalid("render.max_size must be at least 1".to_string());
        }
        let largest = u64::from(self.render.max_size) * u64::from(self.render.scale);
        if largest > u64::from(MAX_RENDER_DIMENSION) {
            return invalid(format!(
                "render.max_size {} at scale {} exceeds the {MAX_RENDER_DIMENSION} pixel limit",
                self.render.max_size, self.render.scale
            ));
        }

        for (key, base) in [
            ("assets.content_base", &self.assets.content_base),
            ("assets.asset_api_base", &self.assets.asset_api_base),
        ] {
            if base.trim().is_empty() {
                return invalid(format!("{key} must not be empty"));
            }
        }
        if self.assets.timeout_secs == 0 {
            return invalid("assets.timeout_secs must be at least 1".to_string());
        }

        if let Some(descriptor) = &self.avatar.default_descriptor {
            let avatar = Avatar::from_json(descriptor).map_err(|e| {
                HandlerError::Config(format!("avatar.default_descriptor is invalid: {e}"))
            })?;
            for part in avatar_core::BodyPart::ALL {
                avatar.color(part).map_err(|e| {
                    HandlerError::Config(format!("avatar.default_descriptor: {e}"))
                })?;
            }
        }
        Ok(())
    }
}
