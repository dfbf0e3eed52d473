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

//! The public-facing SDK of the avatar renderer.
//!
//! This crate ties the lower layers together behind a single [`Handler`]: it
//! decodes a [`RenderRequest`], assembles and rasterizes the avatar, and
//! writes either a [`RenderResponse`] or an [`ErrorResponse`]. The
//! `avatar-render` binary is a thin command-line shell around it.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handler;
pub mod request;
pub mod response;

pub use config::HandlerConfig;
pub use error::HandlerError;
pub use handler::Handler;
pub use request::RenderRequest;
pub use response::{ErrorResponse, RenderResponse};

/// The types most hosts need, in one import.
pub mod prelude {
    pub use crate::config::{AvatarConfig, HandlerConfig, RenderConfig};
    pub use crate::error::HandlerError;
    pub use crate::handler::Handler;
    pub use crate::request::RenderRequest;
    pub use crate::response::{ErrorResponse, RenderResponse};
    pub use avatar_agents::asset_agent::{
        AssetSettings, AssetSource, HttpAssetSource, MemoryAssetSource,
    };
    pub use avatar_core::{Avatar, BodyPart};
}
