//! The visualizer owns the scene and everything that mutates it
//!
//! Pointer handling, asset application and drawing all go through `&mut
//! Visualizer`, so they never interleave. Hosts on other threads talk to it
//! with [`HostEvent`]s that the render loop drains between frames.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::assets::{AsyncTextureLoader, ResourceProvider, TextureKind, TextureLoad};
use crate::collision::Ray;
use crate::config::{ConfigError, VisualizerConfig};
use crate::data::{DataError, DateSelection, NeoFeed};
use crate::foundation::cancel::CancellationToken;
use crate::input::{HostEvent, MouseButton, PointerRelease, PointerState, SurfaceRect};
use crate::interaction::{DetailSink, HighlightState, InteractionResolver};
use crate::render::{Camera, DrawSphere, LoopControl, OrbitControls, RenderBackend, RenderError};
use crate::scene::{BuildOutcome, BuildReport, CentralBody, Scene, SceneBuilder};

/// Errors escalated to the host
#[derive(Error, Debug)]
pub enum VisualizerError {
    /// The backend failed; the render loop cannot continue
    #[error("Render context lost: {0}")]
    RenderContextLost(#[from] RenderError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Feed document could not be loaded
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Interactive NEO scene
pub struct Visualizer<B: RenderBackend> {
    config: VisualizerConfig,
    scene: Scene,
    builder: SceneBuilder,
    camera: Camera,
    controls: OrbitControls,
    pointer: PointerState,
    resolver: InteractionResolver,
    loader: AsyncTextureLoader,
    backend: B,
    sink: Option<Box<dyn DetailSink>>,
    token: CancellationToken,
    rng: StdRng,
    torn_down: bool,
}

impl<B: RenderBackend> Visualizer<B> {
    /// Create a visualizer and start loading its textures
    pub fn new(
        config: VisualizerConfig,
        mut backend: B,
        provider: Arc<dyn ResourceProvider>,
        sink: impl DetailSink + 'static,
    ) -> Result<Self, VisualizerError> {
        let surface = SurfaceRect::from_size(config.surface.width, config.surface.height);
        let aspect = surface.aspect_ratio().unwrap_or(1.0);
        backend.resize(config.surface.width, config.surface.height)?;

        let mut visualizer = Self {
            scene: Scene::new(),
            builder: SceneBuilder::new(&config.palette),
            camera: Camera::from_config(&config.camera, aspect),
            controls: OrbitControls::new(config.controls),
            pointer: PointerState::new(surface),
            resolver: InteractionResolver::new(config.palette.highlight),
            loader: AsyncTextureLoader::new(provider),
            backend,
            sink: Some(Box::new(sink)),
            token: CancellationToken::new(),
            rng: StdRng::from_entropy(),
            torn_down: false,
            config,
        };

        visualizer.request_texture(TextureKind::CentralBody);
        visualizer.request_texture(TextureKind::NeoSurface);

        log::info!(
            "Visualizer created with a {}x{} surface",
            visualizer.config.surface.width,
            visualizer.config.surface.height
        );
        Ok(visualizer)
    }

    /// Make NEO placement reproducible
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replace the scene with the records of one feed date
    pub fn load_dataset(&mut self, feed: &NeoFeed, selection: &DateSelection) -> BuildReport {
        if self.torn_down {
            log::warn!("Ignoring dataset load after teardown");
            return BuildReport {
                date: None,
                created: 0,
                skipped: 0,
                outcome: BuildOutcome::EmptyOrMissingDateSelection,
            };
        }
        self.resolver.reset(&mut self.scene);
        self.builder.build(&mut self.scene, feed, selection, &mut self.rng)
    }

    /// Apply one host event
    ///
    /// Only backend failures during a resize are errors; pointer input never is.
    pub fn handle_event(&mut self, event: HostEvent) -> Result<LoopControl, VisualizerError> {
        if self.torn_down {
            return Ok(LoopControl::Stop);
        }

        match event {
            HostEvent::PointerMoved { x, y } => self.pointer_moved(x, y),
            HostEvent::PointerPressed { x, y, button: MouseButton::Primary } => self.pointer.press(x, y),
            HostEvent::PointerReleased { x, y, button: MouseButton::Primary } => self.pointer_released(x, y),
            HostEvent::PointerPressed { x, y, .. } | HostEvent::PointerReleased { x, y, .. } => {
                self.pointer_moved(x, y)
            }
            HostEvent::Wheel { delta } => self.controls.zoom(delta),
            HostEvent::PointerLeft => {
                self.pointer.leave();
                self.resolver.hover(&mut self.scene, None);
            }
            HostEvent::Resized(surface) => self.resize_surface(surface)?,
            HostEvent::LoadDataset { feed, selection } => {
                self.load_dataset(&feed, &selection);
            }
            HostEvent::Teardown => {
                self.teardown();
                return Ok(LoopControl::Stop);
            }
        }
        Ok(LoopControl::Continue)
    }

    /// Resize the render surface to `width` x `height` pixels at the client origin
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), VisualizerError> {
        self.resize_surface(SurfaceRect::from_size(width, height))
    }

    fn resize_surface(&mut self, surface: SurfaceRect) -> Result<(), VisualizerError> {
        let Some(aspect) = surface.aspect_ratio() else {
            log::warn!("Ignoring resize to empty surface {:?}", surface);
            return Ok(());
        };
        let (width, height) = surface.pixel_size();
        self.backend.resize(width.max(1), height.max(1))?;
        self.pointer.set_surface(surface);
        self.camera.set_aspect_ratio(aspect);
        Ok(())
    }

    /// Run one frame
    ///
    /// Applies finished asset loads, advances the orbit camera by `dt`
    /// seconds, re-resolves hover and draws. A no-op after teardown.
    pub fn tick(&mut self, dt: f32) -> Result<(), VisualizerError> {
        if self.torn_down {
            return Ok(());
        }
        log::trace!("Tick dt={:.4}s", dt);

        let loads = self.loader.poll();
        self.apply_loads(loads);

        if self.controls.update(&mut self.camera, dt) {
            log::trace!("Camera at distance {:.3}", self.camera.distance_to_target());
        }
        self.refresh_hover();

        if let Err(e) = self.draw() {
            log::error!("Frame failed: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    /// Block until outstanding texture loads finish or `timeout` passes
    pub fn await_assets(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while !self.torn_down && self.loader.pending() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                log::warn!("{} texture loads still pending", self.loader.pending());
                return;
            }
            let loads = self.loader.poll_timeout(remaining);
            self.apply_loads(loads);
        }
    }

    /// Dispose of the scene
    ///
    /// Late asset completions are discarded and the detail sink is released.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.token.cancel();
        self.resolver.reset(&mut self.scene);
        self.scene.clear();
        self.sink = None;
        self.torn_down = true;
        log::info!("Visualizer torn down");
    }

    /// Whether [`teardown`](Self::teardown) has run
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current hover state
    pub fn highlight_state(&self) -> HighlightState {
        self.resolver.state()
    }

    /// The rendering backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The rendering backend, mutably
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Active configuration
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Texture loads in flight
    pub fn pending_loads(&self) -> usize {
        self.loader.pending()
    }

    fn request_texture(&mut self, kind: TextureKind) {
        let path = match kind {
            TextureKind::CentralBody => self.config.resources.central_body_texture.clone(),
            TextureKind::NeoSurface => self.config.resources.neo_texture.clone(),
        };
        if let Err(e) = self.loader.request(kind, path.as_str(), &self.token) {
            self.apply_loads(vec![TextureLoad {
                kind,
                path,
                result: Err(e),
            }]);
        }
    }

    fn apply_loads(&mut self, loads: Vec<TextureLoad>) {
        for load in loads {
            match (load.kind, load.result) {
                (TextureKind::CentralBody, Ok(texture)) => {
                    log::info!("Central body texture {} loaded", load.path);
                    self.scene.set_central_body(CentralBody::textured(texture));
                }
                (TextureKind::CentralBody, Err(e)) => {
                    log::warn!("Central body texture {} unavailable: {}", load.path, e);
                    self.scene
                        .set_central_body(CentralBody::flat(self.config.palette.central_body));
                }
                (TextureKind::NeoSurface, Ok(texture)) => {
                    log::info!("NEO texture {} loaded", load.path);
                    self.scene.attach_neo_texture(texture);
                }
                (TextureKind::NeoSurface, Err(e)) => {
                    log::warn!("NEO texture {} unavailable: {}", load.path, e);
                }
            }
        }
    }

    fn pointer_ray(&self) -> Option<Ray> {
        self.pointer
            .ndc()
            .and_then(|ndc| self.camera.screen_to_world_ray(ndc))
    }

    fn refresh_hover(&mut self) {
        let ray = self.pointer_ray();
        self.resolver.hover(&mut self.scene, ray.as_ref());
    }

    fn pointer_moved(&mut self, x: f64, y: f64) {
        match self.pointer.move_to(x, y) {
            Some((dx, dy)) => {
                let height = self.pointer.surface().height as f32;
                self.controls.rotate(dx, dy, height);
            }
            None => self.refresh_hover(),
        }
    }

    fn pointer_released(&mut self, x: f64, y: f64) {
        self.pointer_moved(x, y);
        if self.pointer.release(x, y) != PointerRelease::Click {
            return;
        }
        let Some(ray) = self.pointer_ray() else {
            return;
        };
        if let Some(sink) = self.sink.as_mut() {
            self.resolver.select(&self.scene, &ray, &mut **sink);
        }
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        self.backend
            .begin_frame(&self.camera, self.config.palette.background)?;

        if let Some(body) = self.scene.central_body() {
            self.backend.draw_sphere(&DrawSphere {
                center: body.position(),
                radius: body.radius,
                color: body.color,
                texture: body.texture.as_deref(),
            })?;
        }

        for (_, object) in self.scene.objects() {
            self.backend.draw_sphere(&DrawSphere {
                center: object.visual.position,
                radius: object.visual.radius,
                color: object.visual.color(),
                texture: object.visual.texture.as_deref(),
            })?;
        }

        self.backend.end_frame()
    }
}

impl<B: RenderBackend> Drop for Visualizer<B> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl<B: RenderBackend> std::fmt::Debug for Visualizer<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visualizer")
            .field("objects", &self.scene.len())
            .field("highlight", &self.resolver.state())
            .field("pending_loads", &self.loader.pending())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
