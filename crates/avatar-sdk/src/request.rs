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

//! Decoding of incoming render requests.

use crate::error::HandlerError;
use avatar_core::Avatar;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One render request: an avatar descriptor and an output size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// The avatar descriptor, itself JSON text.
    #[serde(rename = "avatarJSON", default)]
    pub avatar_json: String,
    /// Side length of the square output image, in pixels.
    #[serde(default)]
    pub size: i64,
}

impl RenderRequest {
    /// Creates a request for `avatar_json` rendered at `size` x `size`.
    pub fn new(avatar_json: impl Into<String>, size: i64) -> Self {
        Self {
            avatar_json: avatar_json.into(),
            size,
        }
    }

    /// Reads a request document from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HandlerError> {
        serde_json::from_reader(reader).map_err(HandlerError::Request)
    }

    /// Parses a request document from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HandlerError> {
        serde_json::from_slice(bytes).map_err(HandlerError::Request)
    }

    /// Decodes the avatar descriptor.
    ///
    /// A blank `avatarJSON` decodes `fallback` instead, or fails with
    /// [`HandlerError::EmptyAvatar`] when there is none.
    pub fn avatar(&self, fallback: Option<&str>) -> Result<Avatar, HandlerError> {
        let json = if self.avatar_json.trim().is_empty() {
            fallback.ok_or(HandlerError::EmptyAvatar)?
        } else {
            self.avatar_json.as_str()
        };
        Avatar::from_json(json).map_err(HandlerError::Avatar)
    }

    /// Returns the requested size if it lies in `1..=max`.
    pub fn validated_size(&self, max: u32) -> Result<u32, HandlerError> {
        u32::try_from(self.size)
            .ok()
            .filter(|&size| size >= 1 && size <= max)
            .ok_or(HandlerError::InvalidSize {
                size: self.size,
                max,
            })
    }
}
