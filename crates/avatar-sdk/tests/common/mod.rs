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

//! Fixtures for the handler tests: the asset fixtures of `avatar-agents`,
//! plus handler and request helpers.

#![allow(dead_code)]

#[path = "../../../avatar-agents/tests/common/mod.rs"]
mod assets;

pub use assets::*;

use avatar_sdk::prelude::*;
use std::sync::Arc;

/// A handler wired to [`fixture_source`], returning the source so tests can
/// inspect the requested URLs.
pub fn fixture_handler(config: HandlerConfig) -> (Handler, Arc<MemoryAssetSource>) {
    let source = Arc::new(fixture_source(&config.assets));
    let handler = Handler::with_source(config, source.clone()).expect("valid config");
    (handler, source)
}

/// A request body for `avatar_json` at `size`.
pub fn request_body(avatar_json: &str, size: i64) -> Vec<u8> {
    serde_json::to_vec(&RenderRequest::new(avatar_json, size)).expect("serializable request")
}

/// Runs `body` through [`Handler::handle`] and parses the written document.
pub fn handle(handler: &Handler, body: &[u8]) -> serde_json::Value {
    let mut out = Vec::new();
    handler.handle(body, &mut out).expect("writing to a Vec cannot fail");
    assert_eq!(out.last(), Some(&b'\n'), "document must end with a newline");
    serde_json::from_slice(&out).expect("handler writes valid JSON")
}
