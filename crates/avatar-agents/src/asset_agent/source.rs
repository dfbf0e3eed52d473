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

//! Byte sources the asset agent fetches from.

use super::{error::AssetError, settings::AssetSettings};
use reqwest::blocking::Client;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// Something that can return the raw bytes behind a URL.
pub trait AssetSource: Send + Sync {
    /// Fetches the full body at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError>;
}

/// Fetches assets with blocking, unauthenticated HTTP `GET` requests.
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    client: Client,
}

impl HttpAssetSource {
    /// Builds a client with the timeout and user agent from `settings`.
    pub fn new(settings: &AssetSettings) -> Result<Self, AssetError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(AssetError::Client)?;
        Ok(Self { client })
    }
}

impl AssetSource for HttpAssetSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let http = |source| AssetError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(http)?;
        log::debug!("Fetched {url} ({} bytes)", body.len());
        Ok(body.to_vec())
    }
}

/// An in-memory source serving fixed payloads and recording every request.
///
/// Unknown URLs answer with HTTP 404. Useful for tests and offline renders.
#[derive(Debug, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryAssetSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `bytes` at `url`, replacing any previous payload.
    pub fn insert(&mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.assets.insert(url.into(), bytes.into());
    }

    /// Builder form of [`MemoryAssetSource::insert`].
    pub fn with(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(url, bytes);
        self
    }

    /// Stops serving `url`.
    pub fn remove(&mut self, url: &str) -> Option<Vec<u8>> {
        self.assets.remove(url)
    }

    /// Every URL requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forgets the recorded requests.
    pub fn clear_requests(&self) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| AssetError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
