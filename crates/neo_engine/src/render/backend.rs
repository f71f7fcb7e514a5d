//! Backend abstraction for drawing the scene
//!
//! The visualizer only ever draws lit spheres, so the backend surface is a
//! frame bracket around sphere draws.

use thiserror::Error;

use crate::assets::TextureData;
use crate::foundation::math::Vec3;
use crate::render::Camera;
use crate::scene::Color;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The drawing context is gone and cannot be recovered
    #[error("Render context lost: {0}")]
    ContextLost(String),

    /// Any other backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// One sphere to draw
#[derive(Debug, Clone, Copy)]
pub struct DrawSphere<'a> {
    /// Center in world space
    pub center: Vec3,
    /// Radius in render units
    pub radius: f32,
    /// Material color; tints the texture when one is present
    pub color: Color,
    /// Surface texture
    pub texture: Option<&'a TextureData>,
}

/// Rendering backend
pub trait RenderBackend {
    /// Current surface extent (width, height) in pixels
    fn surface_size(&self) -> (u32, u32);

    /// Resize the drawing surface
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Start a frame seen through `camera`, cleared to `clear`
    fn begin_frame(&mut self, camera: &Camera, clear: Color) -> BackendResult<()>;

    /// Draw one sphere into the current frame
    fn draw_sphere(&mut self, sphere: &DrawSphere<'_>) -> BackendResult<()>;

    /// Finish and present the current frame
    fn end_frame(&mut self) -> BackendResult<()>;
}
