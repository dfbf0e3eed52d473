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

//! Provides the 4x4 matrix used for view and projection transforms.

use super::{Vec3, Vec4, EPSILON};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// Only the operations the rasterizer needs are provided: a right-handed
/// look-at view matrix, a right-handed perspective projection with a `[0, 1]`
/// depth range, and matrix/vector products.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        let pick = |c: &Vec4| match index {
            0 => c.x,
            1 => c.y,
            2 => c.z,
            _ => c.w,
        };
        Vec4::new(
            pick(&self.cols[0]),
            pick(&self.cols[1]),
            pick(&self.cols[2]),
            pick(&self.cols[3]),
        )
    }

    /// Creates a right-handed perspective projection matrix with a [0, 1] depth range.
    ///
    /// # Arguments
    ///
    /// * `fov_y_radians`: Vertical field of view in radians.
    /// * `aspect_ratio`: Width divided by height of the viewport.
    /// * `z_near`: Distance to the near clipping plane (must be positive).
    /// * `z_far`: Distance to the far clipping plane (must be greater than `z_near`).
    ///
    /// Callers validate the parameters; see `CameraSettings::validate`.
    #[inline]
    pub fn perspective_rh_zo(
        fov_y_radians: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let range = z_near - z_far;

        Self::from_cols(
            Vec4::new(f / aspect_ratio, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, z_far / range, -1.0),
            Vec4::new(0.0, 0.0, (z_near * z_far) / range, 0.0),
        )
    }

    /// Creates a right-handed view matrix for a camera at `eye` looking at `target`.
    ///
    /// Returns `None` if `eye` and `target` coincide or `up` is parallel to the
    /// view direction.
    #[inline]
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let forward = target - eye;
        if forward.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let f = forward.normalize();
        let s = f.cross(up);
        if s.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let s = s.normalize();
        let u = s.cross(f);

        Some(Self::from_cols(
            Vec4::new(s.x, u.x, -f.x, 0.0),
            Vec4::new(s.y, u.y, -f.y, 0.0),
            Vec4::new(s.z, u.z, -f.z, 0.0),
            Vec4::new(-eye.dot(s), -eye.dot(u), eye.dot(f), 1.0),
        ))
    }

    /// Transforms a point (`w = 1`) into homogeneous coordinates.
    #[inline]
    pub fn transform_point4(&self, point: Vec3) -> Vec4 {
        *self * Vec4::from_vec3(point, 1.0)
    }
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Composes two transforms; `a * b` applies `b` first.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let rows = [self.row(0), self.row(1), self.row(2), self.row(3)];
        let col = |c: Vec4| {
            Vec4::new(
                rows[0].dot(c),
                rows[1].dot(c),
                rows[2].dot(c),
                rows[3].dot(c),
            )
        };
        Self::from_cols(
            col(rhs.cols[0]),
            col(rhs.cols[1]),
            col(rhs.cols[2]),
            col(rhs.cols[3]),
        )
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, degrees_to_radians};

    #[test]
    fn test_identity_is_neutral() {
        let m = Mat4::perspective_rh_zo(1.0, 1.5, 0.1, 100.0);
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn test_perspective_maps_near_and_far_to_unit_depth() {
        let (near, far) = (0.1, 1000.0);
        let m = Mat4::perspective_rh_zo(degrees_to_radians(50.0), 1.0, near, far);

        let on_near = m.transform_point4(Vec3::new(0.0, 0.0, -near));
        let on_far = m.transform_point4(Vec3::new(0.0, 0.0, -far));
        assert!(approx_eq(on_near.z / on_near.w, 0.0));
        assert!((on_far.z / on_far.w - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_perspective_fov_edge_lands_on_ndc_border() {
        let fov = degrees_to_radians(50.0);
        let m = Mat4::perspective_rh_zo(fov, 1.0, 0.1, 1000.0);
        let depth = 4.0;
        let edge = Vec3::new(0.0, depth * (fov * 0.5).tan(), -depth);
        let clip = m.transform_point4(edge);
        assert!(approx_eq(clip.y / clip.w, 1.0));
    }

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let eye = Vec3::new(-2.0, 0.85, 0.75);
        let target = Vec3::new(0.0, 0.06, 0.0);
        let view = Mat4::look_at_rh(eye, target, Vec3::Y).expect("valid view");

        let t = view.transform_point4(target);
        let distance = (target - eye).length();
        assert!(approx_eq(t.x, 0.0));
        assert!(approx_eq(t.y, 0.0));
        assert!(approx_eq(t.z, -distance));

        let e = view.transform_point4(eye);
        assert!(approx_eq(e.truncate().length(), 0.0));
    }

    #[test]
    fn test_look_at_rejects_degenerate_input() {
        assert!(Mat4::look_at_rh(Vec3::ONE, Vec3::ONE, Vec3::Y).is_none());
        assert!(Mat4::look_at_rh(Vec3::ZERO, Vec3::Y, Vec3::Y).is_none());
    }

    #[test]
    fn test_mul_composes_right_to_left() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).unwrap();
        let proj = Mat4::perspective_rh_zo(1.0, 1.0, 0.1, 100.0);
        let p = Vec3::new(0.3, -0.2, 1.0);
        let combined = (proj * view).transform_point4(p);
        let stepwise = proj * view.transform_point4(p);
        assert!(approx_eq(combined.x, stepwise.x));
        assert!(approx_eq(combined.y, stepwise.y));
        assert!(approx_eq(combined.z, stepwise.z));
        assert!(approx_eq(combined.w, stepwise.w));
    }
}
