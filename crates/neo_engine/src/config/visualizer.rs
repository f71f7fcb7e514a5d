//! Visualizer configuration tree
//!
//! Every section carries `#[serde(default)]` so partial files only override
//! what they name.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::Config;
use crate::scene::Color;

/// Top-level configuration for a [`crate::Visualizer`] and its host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Render surface dimensions
    pub surface: SurfaceConfig,
    /// Camera projection and placement
    pub camera: CameraConfig,
    /// Orbit control tuning
    pub controls: ControlsConfig,
    /// Scene colors
    pub palette: PaletteConfig,
    /// Texture resource locations
    pub resources: ResourceConfig,
    /// Frame pacing
    pub render_loop: RenderLoopConfig,
    /// Logging defaults
    pub logging: LoggingConfig,
}

impl Config for VisualizerConfig {}

/// Render surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface width
    pub width: u32,
    /// Surface height
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { width: 1280, height: 500 }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Initial distance from the central body along +Z
    pub initial_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            initial_distance: 5.0,
        }
    }
}

/// Orbit control tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Rotation speed multiplier for pointer drags
    pub rotate_speed: f32,
    /// Zoom speed multiplier for wheel input
    pub zoom_speed: f32,
    /// Share of the remaining motion removed per 1/60 s, independent of frame rate (0 disables damping)
    pub damping_factor: f32,
    /// Closest allowed camera distance
    pub min_distance: f32,
    /// Farthest allowed camera distance
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            damping_factor: 0.0,
            min_distance: 1.5,
            max_distance: 500.0,
        }
    }
}

/// Scene colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Color of potentially hazardous objects
    pub hazard: Color,
    /// Color of every other object
    pub benign: Color,
    /// Color applied to the hovered object
    pub highlight: Color,
    /// Frame clear color
    pub background: Color,
    /// Central body color when its texture is unavailable
    pub central_body: Color,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hazard: Color::from_hex(0x00ff_0000),
            benign: Color::from_hex(0x0000_ff00),
            highlight: Color::from_hex(0x00ff_ff00),
            background: Color::from_hex(0x0000_0000),
            central_body: Color::from_hex(0x0022_66cc),
        }
    }
}

/// Texture resource locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directory the named resource paths are resolved against
    pub root: PathBuf,
    /// Central body surface texture
    pub central_body_texture: String,
    /// Texture shared by every NEO body
    pub neo_texture: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("resources"),
            central_body_texture: "earth_texture.jpg".to_string(),
            neo_texture: "neo_texture.jpg".to_string(),
        }
    }
}

/// Frame pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderLoopConfig {
    /// Target refresh cadence
    pub target_fps: f32,
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self { target_fps: 60.0 }
    }
}

/// Logging defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// env_logger filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}
