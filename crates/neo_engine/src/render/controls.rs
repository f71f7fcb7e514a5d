//! Orbit camera controls
//!
//! Keeps the camera on a sphere around its target. Pointer drags rotate
//! around the target, wheel input dollies in and out. Input accumulates into
//! pending deltas that [`OrbitControls::update`] applies once per frame.
//! Damping is defined against elapsed time, so the camera settles at the
//! same speed whatever the frame rate.

use crate::config::ControlsConfig;
use crate::foundation::math::{constants, Vec3};
use crate::render::Camera;

/// Smallest polar angle from +Y, keeps the up vector well defined
const MIN_POLAR: f32 = 1.0e-4;

/// Per-notch dolly scale at zoom speed 1
const ZOOM_STEP: f32 = 0.95;

/// Frame rate the damping factor is expressed at
const DAMPING_REFERENCE_FPS: f32 = 60.0;

/// Orbit controller
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: ControlsConfig,
    azimuth_delta: f32,
    polar_delta: f32,
    dolly_scale: f32,
}

impl OrbitControls {
    /// Controls tuned by `config`
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            config,
            azimuth_delta: 0.0,
            polar_delta: 0.0,
            dolly_scale: 1.0,
        }
    }

    /// Queue a rotation for a pointer drag of `(dx, dy)` pixels
    ///
    /// A drag across the full surface height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, surface_height: f32) {
        if surface_height <= 0.0 {
            return;
        }
        let scale = constants::TAU * self.config.rotate_speed / surface_height;
        self.azimuth_delta -= dx * scale;
        self.polar_delta -= dy * scale;
    }

    /// Queue a dolly for wheel input; positive deltas move away from the target
    pub fn zoom(&mut self, wheel_delta: f32) {
        if wheel_delta == 0.0 {
            return;
        }
        let step = ZOOM_STEP.powf(self.config.zoom_speed);
        self.dolly_scale *= if wheel_delta > 0.0 { 1.0 / step } else { step };
    }

    /// Whether input is still waiting to be applied
    pub fn is_moving(&self) -> bool {
        self.azimuth_delta.abs() > 1.0e-6
            || self.polar_delta.abs() > 1.0e-6
            || (self.dolly_scale - 1.0).abs() > 1.0e-6
    }

    /// Apply `dt` seconds of pending motion to `camera`; returns whether it moved
    pub fn update(&mut self, camera: &mut Camera, dt: f32) -> bool {
        if !self.is_moving() {
            return false;
        }

        let fraction = self.damping_fraction(dt);
        if fraction <= 0.0 {
            return false;
        }

        let offset = camera.position - camera.target;
        let radius = offset.magnitude();
        if radius <= f32::EPSILON {
            self.stop();
            return false;
        }

        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        azimuth += self.azimuth_delta * fraction;
        polar = (polar + self.polar_delta * fraction).clamp(MIN_POLAR, constants::PI - MIN_POLAR);
        let radius = (radius * self.dolly_scale.powf(fraction))
            .clamp(self.config.min_distance, self.config.max_distance);

        let (sin_polar, cos_polar) = polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
        camera.position = camera.target
            + Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth) * radius;

        if fraction < 1.0 {
            let keep = 1.0 - fraction;
            self.azimuth_delta *= keep;
            self.polar_delta *= keep;
            self.dolly_scale = self.dolly_scale.powf(keep);
        } else {
            self.stop();
        }

        log::trace!("Orbit camera moved to {:?}", camera.position);
        true
    }

    /// Share of the pending motion applied over `dt` seconds
    ///
    /// `damping_factor` is the share removed per 1/60 s; zero disables damping.
    fn damping_fraction(&self, dt: f32) -> f32 {
        let damping = self.config.damping_factor;
        if damping <= 0.0 || damping >= 1.0 {
            return 1.0;
        }
        let frames = dt.max(0.0) * DAMPING_REFERENCE_FPS;
        1.0 - (1.0 - damping).powf(frames)
    }

    /// Drop any pending motion
    pub fn stop(&mut self) {
        self.azimuth_delta = 0.0;
        self.polar_delta = 0.0;
        self.dolly_scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FRAME: f32 = 1.0 / 60.0;

    fn camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0)
    }

    #[test]
    fn test_rotation_keeps_distance() {
        let mut controls = OrbitControls::new(ControlsConfig::default());
        let mut camera = camera();

        controls.rotate(125.0, -40.0, 500.0);
        assert!(controls.update(&mut camera, FRAME));

        assert_relative_eq!(camera.distance_to_target(), 5.0, epsilon = 1e-4);
        assert!(camera.position.x.abs() > 0.1);
        assert!(!controls.is_moving());
    }

    #[test]
    fn test_full_height_drag_turns_once_around() {
        let mut controls = OrbitControls::new(ControlsConfig::default());
        let mut camera = camera();

        controls.rotate(500.0, 0.0, 500.0);
        controls.update(&mut camera, FRAME);

        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0), epsilon = 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let config = ControlsConfig::default();
        let mut controls = OrbitControls::new(config);
        let mut camera = camera();

        for _ in 0..200 {
            controls.zoom(-1.0);
        }
        controls.update(&mut camera, FRAME);
        assert_relative_eq!(camera.distance_to_target(), config.min_distance, epsilon = 1e-4);

        for _ in 0..400 {
            controls.zoom(1.0);
        }
        controls.update(&mut camera, FRAME);
        assert_relative_eq!(camera.distance_to_target(), config.max_distance, epsilon = 1e-2);
    }

    #[test]
    fn test_damping_spreads_motion_over_frames() {
        let mut controls = OrbitControls::new(ControlsConfig {
            damping_factor: 0.25,
            ..Default::default()
        });
        let mut camera = camera();

        controls.zoom(1.0);
        controls.update(&mut camera, FRAME);
        let after_first = camera.distance_to_target();

        assert!(after_first > 5.0);
        assert!(after_first < 5.0 / ZOOM_STEP);
        assert!(controls.is_moving());
    }

    #[test]
    fn test_damping_does_not_depend_on_frame_rate() {
        let config = ControlsConfig {
            damping_factor: 0.2,
            ..Default::default()
        };
        let mut slow = OrbitControls::new(config);
        let mut fast = OrbitControls::new(config);
        let (mut slow_camera, mut fast_camera) = (camera(), camera());

        slow.rotate(100.0, 0.0, 500.0);
        fast.rotate(100.0, 0.0, 500.0);
        for _ in 0..6 {
            slow.update(&mut slow_camera, 1.0 / 30.0);
        }
        for _ in 0..24 {
            fast.update(&mut fast_camera, 1.0 / 120.0);
        }

        assert_relative_eq!(slow_camera.position, fast_camera.position, epsilon = 1e-4);
        assert!(slow.is_moving());
    }

    #[test]
    fn test_zero_dt_applies_no_damped_motion() {
        let mut controls = OrbitControls::new(ControlsConfig {
            damping_factor: 0.5,
            ..Default::default()
        });
        let mut camera = camera();

        controls.zoom(1.0);
        assert!(!controls.update(&mut camera, 0.0));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert!(controls.is_moving());
    }

    #[test]
    fn test_idle_controls_leave_camera_alone() {
        let mut controls = OrbitControls::new(ControlsConfig::default());
        let mut camera = camera();
        assert!(!controls.update(&mut camera, FRAME));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
    }
}
