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

//! Acts as the **[A]gent** for the asset subsystem.
//!
//! This module is the public-facing API for requesting assets. It owns the I/O
//! (an [`AssetSource`], HTTP in production) and delegates the CPU-bound work of
//! decoding to the loader lanes in `avatar-lanes`. Face resolution, which needs
//! a metadata round-trip through the asset API, lives here too.

mod agent;
mod error;
mod face;
mod loader;
mod settings;
mod source;

pub use agent::*;
pub use error::*;
pub use face::*;
pub use settings::*;
pub use source::*;
