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

//! The error type shared by the agents.

use crate::asset_agent::AssetError;
use avatar_core::error::RenderError;
use thiserror::Error;

/// An error raised while assembling or rendering an avatar.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Fetching or decoding an asset failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The avatar or the scene cannot be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}
