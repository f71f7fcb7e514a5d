//! Scene graph
//!
//! The scene holds the central body and one [`SceneObject`] per NEO. Every
//! object pairs a drawn [`VisualBody`] with an invisible [`HitVolume`] that
//! is what pointer rays are tested against.

mod builder;
mod color;
mod graph;
mod object;

pub use builder::{BuildOutcome, BuildReport, SceneBuilder};
pub use color::Color;
pub use graph::Scene;
pub use object::{
    CentralBody, HitVolume, NeoKey, SceneObject, VisualBody, CENTRAL_BODY_RADIUS,
    HIT_VOLUME_MULTIPLIER, TEXTURE_TINT,
};
