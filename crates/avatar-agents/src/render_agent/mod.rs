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

//! Acts as the **[A]gent** for rendering.
//!
//! It assembles the avatar's scene from the asset agent's meshes and textures,
//! fits the camera, and drives a render lane to produce the final image.

mod agent;
mod assembly;
mod settings;

pub use agent::*;
pub use assembly::*;
pub use settings::*;
