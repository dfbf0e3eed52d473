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

//! Defines the error type for scene construction and rasterization.

use thiserror::Error;

/// An error raised while preparing or rasterizing a scene.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A color string was not a valid `RGB`, `RRGGBB` or `RRGGBBAA` hex value.
    #[error("invalid hex color '{0}'")]
    InvalidColor(String),

    /// The avatar descriptor has no color for a body part.
    #[error("avatar has no color for body part '{0}'")]
    MissingColor(&'static str),

    /// The requested output size is zero or above the configured maximum.
    #[error("invalid output size {size} (expected 1..={max})")]
    InvalidSize {
        /// The requested side length in pixels.
        size: i64,
        /// The largest accepted side length.
        max: u32,
    },

    /// The supersampling scale is zero.
    #[error("supersampling scale must be at least 1")]
    InvalidScale,

    /// The camera parameters cannot produce a view or projection matrix.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    /// The shader parameters are unusable.
    #[error("invalid shader: {0}")]
    InvalidShader(String),

    /// The scene contains no geometry to frame or rasterize.
    #[error("scene contains no geometry")]
    EmptyScene,

    /// A mesh handed to the rasterizer is malformed.
    #[error("invalid mesh for '{part}': {reason}")]
    InvalidMesh {
        /// The body part the mesh belongs to.
        part: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The rendered image could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(String),
}
