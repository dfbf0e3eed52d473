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

//! Errors raised by the loader lanes.

use thiserror::Error;

/// A payload decoded without a parser error but unusable as an asset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The OBJ text contains no vertices.
    #[error("no geometry found in OBJ file")]
    NoGeometry,

    /// A face references a vertex the file does not define.
    #[error("OBJ face references a missing vertex")]
    IndexOutOfRange,

    /// The decoded image cannot back a texture.
    #[error("decoded image has unusable dimensions {width}x{height}")]
    BadDimensions {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
}
