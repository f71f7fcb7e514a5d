//! Rendering
//!
//! The camera and orbit controls decide what is seen; a [`RenderBackend`]
//! draws it. [`SnapshotBackend`] is a software backend for headless hosts.

mod backend;
mod camera;
mod controls;
mod render_loop;
mod snapshot;

pub use backend::{BackendResult, DrawSphere, RenderBackend, RenderError};
pub use camera::Camera;
pub use controls::OrbitControls;
pub use render_loop::{FrameStats, LoopControl, RenderLoop, StopHandle};
pub use snapshot::SnapshotBackend;
