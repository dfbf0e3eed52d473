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

//! Errors raised while serving one invocation.

use avatar_agents::AgentError;
use avatar_core::error::RenderError;
use thiserror::Error;

/// An error that ends an invocation with an error document.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request body is not a valid request document.
    #[error("invalid request")]
    Request(#[source] serde_json::Error),

    /// The `avatarJSON` field is not a valid avatar descriptor.
    #[error("invalid avatar descriptor")]
    Avatar(#[source] serde_json::Error),

    /// The `avatarJSON` field is empty and no fallback descriptor is configured.
    #[error("avatarJSON is empty and no default avatar is configured")]
    EmptyAvatar,

    /// The requested size is outside the accepted range.
    #[error("invalid size {size} (expected 1..={max})")]
    InvalidSize {
        /// The requested side length.
        size: i64,
        /// The configured maximum.
        max: u32,
    },

    /// The configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Fetching or assembling the avatar failed.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Rasterizing or encoding the image failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Reading the request or writing the response failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
