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

//! Defines the configurable camera parameters.

use crate::{
    error::RenderError,
    math::{degrees_to_radians, Mat4, Vec3, EPSILON},
};
use serde::{Deserialize, Serialize};

/// The perspective camera the avatar is viewed through.
///
/// `eye` and `center` set the viewing direction; the auto-fit step later
/// re-centers the camera on the scene while keeping that direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Camera position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub center: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view, in degrees.
    pub fov_y_degrees: f32,
    /// Distance to the near clipping plane.
    pub z_near: f32,
    /// Distance to the far clipping plane.
    pub z_far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-2.0, 0.85, 0.75),
            center: Vec3::new(0.0, 0.06, 0.0),
            up: Vec3::Y,
            fov_y_degrees: 50.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl CameraSettings {
    /// Checks that the parameters describe a usable perspective camera.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: &str| Err(RenderError::InvalidCamera(msg.to_string()));

        if !(self.eye.is_finite() && self.center.is_finite() && self.up.is_finite()) {
            return invalid("eye, center and up must be finite");
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return invalid("fov_y_degrees must be within (0, 180)");
        }
        if !(self.z_near > 0.0 && self.z_near < self.z_far) || !self.z_far.is_finite() {
            return invalid("expected 0 < z_near < z_far");
        }
        let forward = self.center - self.eye;
        if forward.length_squared() < EPSILON * EPSILON {
            return invalid("eye and center coincide");
        }
        if forward.normalize().cross(self.up).length_squared() < EPSILON * EPSILON {
            return invalid("up is parallel to the view direction");
        }
        Ok(())
    }

    /// Vertical field of view in radians.
    #[inline]
    pub fn fov_y_radians(&self) -> f32 {
        degrees_to_radians(self.fov_y_degrees)
    }

    /// Unit vector from `center` toward `eye`.
    #[inline]
    pub fn back_direction(&self) -> Vec3 {
        (self.eye - self.center).normalize()
    }

    /// Calculates the view matrix.
    pub fn view_matrix(&self) -> Result<Mat4, RenderError> {
        Mat4::look_at_rh(self.eye, self.center, self.up).ok_or_else(|| {
            RenderError::InvalidCamera("degenerate look-at configuration".to_string())
        })
    }

    /// Calculates the projection matrix for a viewport aspect ratio.
    #[inline]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_zo(self.fov_y_radians(), aspect_ratio, self.z_near, self.z_far)
    }

    /// Calculates the combined view-projection matrix.
    pub fn view_projection_matrix(&self, aspect_ratio: f32) -> Result<Mat4, RenderError> {
        Ok(self.projection_matrix(aspect_ratio) * self.view_matrix()?)
    }
}
