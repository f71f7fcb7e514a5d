//! # NEO Engine
//!
//! Spatial visualization and interaction engine for near-Earth-object feeds.
//!
//! ## Features
//!
//! - **Spatial Mapping**: NeoWs records to scaled, positioned spheres
//! - **Scene Graph**: Visual bodies paired with larger invisible hit volumes
//! - **Render Loop**: Frame-paced drawing through a pluggable backend
//! - **Interaction**: Hover highlighting and click-to-inspect selection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neo_engine::prelude::*;
//! use std::sync::{mpsc, Arc};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = VisualizerConfig::default();
//!     let backend = SnapshotBackend::new(config.surface.width, config.surface.height);
//!     let provider = Arc::new(FileResourceProvider::new(&config.resources.root));
//!     let sink = |record: Arc<NearEarthObjectRecord>| {
//!         println!("{}", DetailSummary::from_record(&record));
//!     };
//!
//!     let mut visualizer = Visualizer::new(config.clone(), backend, provider, sink)?;
//!     let feed = NeoFeed::from_path("feed.json")?;
//!     visualizer.load_dataset(&feed, &DateSelection::First);
//!
//!     let (events, receiver) = mpsc::channel();
//!     events.send(HostEvent::PointerMoved { x: 640.0, y: 250.0 })?;
//!     drop(events);
//!     RenderLoop::from_config(&config.render_loop).run(&mut visualizer, &receiver)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod data;
pub mod mapping;
pub mod collision;
pub mod scene;
pub mod assets;
pub mod render;
pub mod input;
pub mod interaction;

mod visualizer;

pub use visualizer::{Visualizer, VisualizerError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Visualizer, VisualizerError,
        assets::{FileResourceProvider, MemoryResourceProvider, ResourceProvider, TextureData},
        config::{Config, ConfigError, VisualizerConfig},
        data::{DateSelection, NearEarthObjectRecord, NeoFeed},
        foundation::math::{Vec2, Vec3},
        input::{HostEvent, MouseButton, SurfaceRect},
        interaction::{ChannelSink, DetailSink, DetailSummary, HighlightState},
        render::{Camera, FrameStats, RenderBackend, RenderLoop, SnapshotBackend},
        scene::{BuildOutcome, BuildReport, Color, NeoKey, Scene},
    };
}

#[cfg(test)]
mod tests;
