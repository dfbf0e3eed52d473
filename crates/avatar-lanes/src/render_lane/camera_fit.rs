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

//! Auto-framing of the camera around the scene's bounding box.

use avatar_core::{
    error::RenderError,
    math::{Aabb, Mat4},
    renderer::CameraSettings,
};

/// A camera re-positioned so the whole scene is in view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedCamera {
    /// The adjusted camera parameters.
    pub camera: CameraSettings,
    /// The view-projection matrix of `camera` for the fitted aspect ratio.
    pub view_projection: Mat4,
}

/// Frames `bounds` with `camera`'s view direction, up vector and lens.
///
/// The camera is re-centered on the box and pulled back along its configured
/// viewing direction until all eight corners fall inside the frustum. A
/// `margin` of `0.1` leaves 10% of padding on the tightest axis.
pub fn fit_camera(
    bounds: &Aabb,
    camera: &CameraSettings,
    aspect_ratio: f32,
    margin: f32,
) -> Result<FittedCamera, RenderError> {
    camera.validate()?;
    if !bounds.is_valid() {
        return Err(RenderError::EmptyScene);
    }
    if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
        return Err(RenderError::InvalidCamera(format!(
            "aspect ratio must be positive, got {aspect_ratio}"
        )));
    }

    let back = camera.back_direction();
    let forward = -back;
    let side = forward.cross(camera.up).normalize();
    let up = side.cross(forward);

    let padding = 1.0 + margin.max(0.0);
    let tan_v = (camera.fov_y_radians() * 0.5).tan() / padding;
    let tan_h = tan_v * aspect_ratio;

    let center = bounds.center();
    let distance = bounds
        .corners()
        .iter()
        .map(|&corner| {
            let p = corner - center;
            let along = p.dot(back);
            let horizontal = along + p.dot(side).abs() / tan_h;
            let vertical = along + p.dot(up).abs() / tan_v;
            let near = along + camera.z_near;
            horizontal.max(vertical).max(near)
        })
        .fold(camera.z_near, f32::max);

    let fitted = CameraSettings {
        eye: center + back * distance,
        center,
        ..*camera
    };

    let view_projection = fitted.view_projection_matrix(aspect_ratio)?;
    Ok(FittedCamera {
        camera: fitted,
        view_projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use avatar_core::math::Vec3;

    fn body_bounds() -> Aabb {
        Aabb::from_min_max(Vec3::new(-1.0, -2.0, -0.5), Vec3::new(1.0, 2.0, 0.5))
    }

    fn project(m: &Mat4, p: Vec3) -> Vec3 {
        let c = m.transform_point4(p);
        Vec3::new(c.x / c.w, c.y / c.w, c.z / c.w)
    }

    #[test]
    fn test_all_corners_land_inside_ndc() {
        let bounds = body_bounds();
        let fitted = fit_camera(&bounds, &CameraSettings::default(), 1.0, 0.0).unwrap();

        let mut max_extent: f32 = 0.0;
        for corner in bounds.corners() {
            let ndc = project(&fitted.view_projection, corner);
            assert!(ndc.x.abs() <= 1.0 + 1e-4, "{ndc:?}");
            assert!(ndc.y.abs() <= 1.0 + 1e-4, "{ndc:?}");
            assert!((0.0..=1.0).contains(&ndc.z), "{ndc:?}");
            max_extent = max_extent.max(ndc.x.abs()).max(ndc.y.abs());
        }
        // The fit is tight: some corner touches the frustum edge.
        assert_abs_diff_eq!(max_extent, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_view_direction_is_preserved() {
        let camera = CameraSettings::default();
        let fitted = fit_camera(&body_bounds(), &camera, 1.0, 0.0).unwrap();
        assert_abs_diff_eq!(
            fitted.camera.back_direction(),
            camera.back_direction(),
            epsilon = 1e-5
        );
        assert_eq!(fitted.camera.center, body_bounds().center());
        assert_eq!(fitted.camera.fov_y_degrees, camera.fov_y_degrees);
    }

    #[test]
    fn test_margin_pulls_camera_back() {
        let camera = CameraSettings::default();
        let tight = fit_camera(&body_bounds(), &camera, 1.0, 0.0).unwrap();
        let padded = fit_camera(&body_bounds(), &camera, 1.0, 0.2).unwrap();
        let d = |f: &FittedCamera| (f.camera.eye - f.camera.center).length();
        assert!(d(&padded) > d(&tight));
    }

    #[test]
    fn test_degenerate_inputs_are_errors() {
        let camera = CameraSettings::default();
        assert!(matches!(
            fit_camera(&Aabb::INVALID, &camera, 1.0, 0.0),
            Err(RenderError::EmptyScene)
        ));
        assert!(fit_camera(&body_bounds(), &camera, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_single_point_scene_is_framed() {
        let point = Aabb::from_min_max(Vec3::ONE, Vec3::ONE);
        let fitted = fit_camera(&point, &CameraSettings::default(), 1.0, 0.0).unwrap();
        let ndc = project(&fitted.view_projection, Vec3::ONE);
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    }
}
