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

//! A registry of loader lanes, keyed by the asset type they produce.

use anyhow::{anyhow, Result};
use avatar_core::asset::Asset;
use avatar_lanes::asset_lane::AssetLoaderLane;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    time::Instant,
};

/// Internal trait for loading any asset type.
trait AnyLoaderLane: Send + Sync {
    fn load_any(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>>;
}

/// A "wrapper" that takes a generic `AssetLoaderLane<A>` and implements `AnyLoaderLane`.
struct AssetLoaderLaneWrapper<A: Asset, L: AssetLoaderLane<A>>(
    L,
    std::marker::PhantomData<fn() -> A>,
);

impl<A: Asset, L: AssetLoaderLane<A>> AnyLoaderLane for AssetLoaderLaneWrapper<A, L> {
    fn load_any(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>> {
        let asset: A = self.0.load(bytes).map_err(|e| anyhow!(e.to_string()))?;
        Ok(Box::new(asset))
    }
}

struct RegisteredLoader {
    kind: &'static str,
    lane: Box<dyn AnyLoaderLane>,
}

/// The registry the asset agent decodes through.
#[derive(Default)]
pub(crate) struct AssetLoaderLaneRegistry {
    loaders: HashMap<TypeId, RegisteredLoader>,
}

impl AssetLoaderLaneRegistry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers the lane decoding assets of type `A`, replacing any previous one.
    pub(crate) fn register<A: Asset>(
        &mut self,
        kind: &'static str,
        loader: impl AssetLoaderLane<A> + 'static,
    ) {
        let wrapped = AssetLoaderLaneWrapper(loader, std::marker::PhantomData);
        self.loaders.insert(
            TypeId::of::<A>(),
            RegisteredLoader {
                kind,
                lane: Box::new(wrapped),
            },
        );
    }

    /// The name an asset type was registered under.
    pub(crate) fn kind_of<A: Asset>(&self) -> &'static str {
        self.loaders
            .get(&TypeId::of::<A>())
            .map_or("asset", |l| l.kind)
    }

    /// Decodes `bytes` into an asset of type `A`.
    pub(crate) fn load<A: Asset>(&self, bytes: &[u8]) -> Result<A> {
        let loader = self
            .loaders
            .get(&TypeId::of::<A>())
            .ok_or_else(|| anyhow!("No loader registered for {}", std::any::type_name::<A>()))?;

        let started = Instant::now();
        let asset_any = loader.lane.load_any(bytes)?;
        log::trace!(
            "Decoded {} ({} bytes) in {:?}",
            loader.kind,
            bytes.len(),
            started.elapsed()
        );

        let asset_boxed = asset_any.downcast::<A>().map_err(|_| {
            anyhow!(
                "Loader for '{}' returned a different asset type than requested",
                loader.kind
            )
        })?;
        Ok(*asset_boxed)
    }
}
