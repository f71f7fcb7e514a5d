//! Shared fixtures for the cross-module tests

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use crate::assets::{AssetError, MemoryResourceProvider, ResourceProvider};
use crate::config::VisualizerConfig;
use crate::data::{NearEarthObjectRecord, NeoFeed};
use crate::foundation::math::Vec3;
use crate::interaction::ChannelSink;
use crate::render::{BackendResult, Camera, DrawSphere, RenderBackend, RenderError};
use crate::scene::Color;
use crate::Visualizer;

pub const WAIT: Duration = Duration::from_secs(5);

/// One recorded sphere draw
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
    pub textured: bool,
}

/// Backend that records draws and can simulate a lost context
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub size: (u32, u32),
    pub frames: Vec<Vec<RecordedSphere>>,
    pub lose_context_at_frame: Option<usize>,
    current: Option<Vec<RecordedSphere>>,
}

impl RecordingBackend {
    pub fn losing_context_at(frame: usize) -> Self {
        Self {
            lose_context_at_frame: Some(frame),
            ..Default::default()
        }
    }

    pub fn last_frame(&self) -> &[RecordedSphere] {
        self.frames.last().map(Vec::as_slice).unwrap_or_default()
    }
}

impl RenderBackend for RecordingBackend {
    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()> {
        self.size = (width, height);
        Ok(())
    }

    fn begin_frame(&mut self, _camera: &Camera, _clear: Color) -> BackendResult<()> {
        if self.lose_context_at_frame == Some(self.frames.len()) {
            return Err(RenderError::ContextLost("device removed".to_string()));
        }
        self.current = Some(Vec::new());
        Ok(())
    }

    fn draw_sphere(&mut self, sphere: &DrawSphere<'_>) -> BackendResult<()> {
        let frame = self
            .current
            .as_mut()
            .ok_or_else(|| RenderError::Backend("no frame".to_string()))?;
        frame.push(RecordedSphere {
            center: sphere.center,
            radius: sphere.radius,
            color: sphere.color,
            textured: sphere.texture.is_some(),
        });
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        let frame = self
            .current
            .take()
            .ok_or_else(|| RenderError::Backend("no frame".to_string()))?;
        self.frames.push(frame);
        Ok(())
    }
}

/// Provider that blocks every fetch until released
#[derive(Default)]
pub struct GatedProvider {
    open: Mutex<bool>,
    signal: Condvar,
    served: AtomicUsize,
}

impl GatedProvider {
    pub fn release(&self) {
        *self.open.lock().unwrap() = true;
        self.signal.notify_all();
    }

    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

impl ResourceProvider for GatedProvider {
    fn fetch(&self, _path: &str) -> Result<Vec<u8>, AssetError> {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.signal.wait(open).unwrap();
        }
        self.served.fetch_add(1, Ordering::SeqCst);
        Ok(png_bytes([90, 90, 90, 255]))
    }
}

pub fn png_bytes(color: [u8; 4]) -> Vec<u8> {
    let pixels = image::RgbaImage::from_pixel(4, 4, image::Rgba(color));
    let mut encoded = std::io::Cursor::new(Vec::new());
    pixels.write_to(&mut encoded, image::ImageFormat::Png).unwrap();
    encoded.into_inner()
}

/// Provider serving both default textures
pub fn textured_provider() -> MemoryResourceProvider {
    let resources = VisualizerConfig::default().resources;
    MemoryResourceProvider::new()
        .with(resources.central_body_texture, png_bytes([30, 60, 200, 255]))
        .with(resources.neo_texture, png_bytes([128, 128, 128, 255]))
}

pub fn neo(id: &str, diameter_m: f64, hazardous: bool, miss_km: &str) -> Value {
    json!({
        "id": id,
        "name": format!("({})", id),
        "absolute_magnitude_h": 22.1,
        "estimated_diameter": {
            "meters": { "estimated_diameter_min": diameter_m / 2.0, "estimated_diameter_max": diameter_m }
        },
        "is_potentially_hazardous_asteroid": hazardous,
        "close_approach_data": [{
            "close_approach_date": "2023-09-12",
            "close_approach_date_full": "2023-Sep-12 08:15",
            "relative_velocity": { "kilometers_per_hour": "54321.0" },
            "miss_distance": { "kilometers": miss_km },
            "orbiting_body": "Earth"
        }]
    })
}

pub fn feed(date: &str, records: Vec<Value>) -> NeoFeed {
    NeoFeed {
        element_count: Some(records.len() as u64),
        near_earth_objects: BTreeMap::from([(date.to_string(), Value::Array(records))]),
    }
}

pub type Selections = Receiver<Arc<NearEarthObjectRecord>>;

pub fn visualizer_with(
    backend: RecordingBackend,
    provider: Arc<dyn ResourceProvider>,
) -> (Visualizer<RecordingBackend>, Selections) {
    let (sender, selections) = mpsc::channel();
    let mut visualizer =
        Visualizer::new(VisualizerConfig::default(), backend, provider, ChannelSink(sender)).unwrap();
    visualizer.set_rng_seed(2023);
    (visualizer, selections)
}

pub fn visualizer() -> (Visualizer<RecordingBackend>, Selections) {
    visualizer_with(RecordingBackend::default(), Arc::new(textured_provider()))
}

/// Client pixel at which `point` appears on the default surface
pub fn pixel_of(visualizer: &Visualizer<RecordingBackend>, point: Vec3) -> (f64, f64) {
    let surface = visualizer.config().surface;
    let ndc = visualizer.camera().project_point(point).unwrap();
    (
        f64::from((ndc.x + 1.0) / 2.0) * f64::from(surface.width),
        f64::from((1.0 - ndc.y) / 2.0) * f64::from(surface.height),
    )
}

/// Bodies whose drawn color differs from their construction color
pub fn recolored(visualizer: &Visualizer<RecordingBackend>) -> Vec<Color> {
    visualizer
        .scene()
        .objects()
        .filter(|(_, object)| object.visual.is_recolored())
        .map(|(_, object)| object.visual.color())
        .collect()
}
