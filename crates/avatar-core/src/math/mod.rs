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

//! Provides the linear algebra and color primitives used by the rasterizer.
//!
//! All angular functions in this module operate in **radians** unless the name
//! says otherwise (e.g., `degrees_to_radians`). Matrices are column-major and
//! right-handed, with a `[0, 1]` clip-space depth range.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::PI;

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;

// --- Declare Sub-Modules ---

pub mod color;
pub mod geometry;
pub mod matrix;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::color::Rgba;
pub use self::geometry::Aabb;
pub use self::matrix::Mat4;
pub use self::vector::{Vec2, Vec3, Vec4};

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use avatar_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Returns the fractional part of `value`, always in `[0.0, 1.0)`.
///
/// Unlike [`f32::fract`], negative inputs wrap around instead of keeping their
/// sign, which is what texture addressing in repeat mode needs.
///
/// ```
/// use avatar_core::math::wrap01;
/// assert_eq!(wrap01(1.25), 0.25);
/// assert_eq!(wrap01(-0.25), 0.75);
/// ```
#[inline]
pub fn wrap01(value: f32) -> f32 {
    let f = value - value.floor();
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
