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

//! Errors raised while fetching and decoding assets.

use thiserror::Error;

/// An error raised while fetching, decoding or resolving an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response arrived, or the body could not be read.
    #[error("request to {url} failed")]
    Http {
        /// The requested URL.
        url: String,
        /// The transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The payload could not be decoded into the expected asset.
    #[error("failed to decode {kind} from {url}: {reason}")]
    Decode {
        /// The requested URL.
        url: String,
        /// What the payload was expected to be.
        kind: &'static str,
        /// The decoder's message.
        reason: String,
    },

    /// The asset API's metadata response is not the expected JSON shape.
    #[error("malformed asset metadata from {url}: {reason}")]
    Metadata {
        /// The requested URL.
        url: String,
        /// What is wrong with it.
        reason: String,
    },

    /// `items.face` holds something other than a non-negative number.
    #[error("invalid face item {0}")]
    InvalidFaceId(String),

    /// The first metadata entry for an item has no texture reference.
    #[error("asset metadata for item {item_id} has no texture")]
    MissingTexture {
        /// The face item id.
        item_id: u64,
    },

    /// A texture reference does not start with `asset://`.
    #[error("texture reference '{0}' is not an asset:// URI")]
    InvalidTextureRef(String),
}
