//! Perspective camera
//!
//! Right-handed, Y-up, looking down -Z in view space with clip-space depth in
//! [-1, 1]. Picking unprojects through the inverse of the same matrices the
//! renderer projects with.

use crate::collision::Ray;
use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec2, Vec3, Vec4};

/// 3D camera for perspective projection
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at in world space
    pub target: Vec3,
    /// Up vector for camera orientation
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Distance to near clipping plane
    pub near: f32,
    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Camera on +Z at the configured distance, looking at the central body
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::perspective(
            Vec3::new(0.0, 0.0, config.initial_distance),
            config.fov_degrees,
            aspect,
            config.near,
            config.far,
        )
    }

    /// Update aspect ratio for surface size changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            log::warn!("Ignoring invalid aspect ratio {}", aspect);
            return;
        }
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// View-to-clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined world-to-clip transform
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Distance from the camera to its target
    pub fn distance_to_target(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// Ray from the camera through a point in normalized device coordinates
    ///
    /// `ndc` is in [-1, 1] on both axes with +Y up. Returns `None` if the
    /// camera matrices are degenerate.
    pub fn screen_to_world_ray(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = self.view_projection_matrix().try_inverse()?;

        let near = unproject(&inverse, Vec4::new(ndc.x, ndc.y, -1.0, 1.0))?;
        let far = unproject(&inverse, Vec4::new(ndc.x, ndc.y, 1.0, 1.0))?;

        let direction = far - near;
        if direction.magnitude_squared() <= f32::EPSILON {
            return None;
        }
        Some(Ray::new(self.position, direction))
    }

    /// Project a world-space point to NDC
    ///
    /// The returned `z` is clip-space depth. Points behind the camera yield
    /// `None`.
    pub fn project_point(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection_matrix() * point.push(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.xyz() / clip.w)
    }
}

fn unproject(inverse: &Mat4, ndc: Vec4) -> Option<Vec3> {
    let world = inverse * ndc;
    (world.w.abs() > f32::EPSILON).then(|| world.xyz() / world.w)
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1280.0 / 500.0)
    }
}
