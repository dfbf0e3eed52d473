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

//! Provides the foundational traits for decoded assets.
//!
//! Meshes and textures are fetched as raw bytes, decoded by a loader lane and
//! then handed around as [`AssetHandle`]s. Nothing outlives a single render.

mod handle;

pub use handle::*;

/// A marker trait for types that can be produced by an asset loader.
///
/// `Send + Sync + 'static` keeps decoded assets shareable through an
/// [`AssetHandle`] without lifetimes leaking into the scene types.
///
/// # Examples
///
/// ```
/// use avatar_core::asset::Asset;
///
/// struct Heightmap {
///     samples: Vec<f32>,
/// }
///
/// impl Asset for Heightmap {}
/// ```
pub trait Asset: Send + Sync + 'static {}
