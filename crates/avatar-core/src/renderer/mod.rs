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

//! Renderer data types shared by the raster lane and the render agent.
//!
//! Everything here is plain CPU data: meshes, textures, the camera and shader
//! parameters, and the scene that groups them for a single render.

pub mod camera;
pub mod light;
pub mod mesh;
pub mod scene;
pub mod shader;
pub mod texture;

pub use self::camera::CameraSettings;
pub use self::light::DirectionalLight;
pub use self::mesh::{Mesh, Vertex};
pub use self::scene::{Scene, SceneObject};
pub use self::shader::ShaderSettings;
pub use self::texture::{AddressMode, FilterMode, SamplerDescriptor, Texture};
