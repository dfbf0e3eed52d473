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

//! # Avatar Agents
//!
//! Agents own the I/O and the orchestration around the lanes: the asset agent
//! fetches and decodes meshes and textures and resolves the face, the render
//! agent assembles the avatar's scene and renders it.

#![warn(missing_docs)]

pub mod asset_agent;
pub mod error;
pub mod render_agent;

pub use asset_agent::{AssetAgent, AssetError, AssetSettings};
pub use error::AgentError;
pub use render_agent::{RenderAgent, RenderSettings, SceneAssembler};
