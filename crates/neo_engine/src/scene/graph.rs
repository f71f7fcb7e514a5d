//! Scene arena
//!
//! Owns every [`SceneObject`] and the [`CentralBody`]. Objects live in a slot
//! map; hit volumes refer back to their body through its [`NeoKey`], so a
//! stale key from before a rebuild resolves to nothing instead of to a
//! different object.

use slotmap::SlotMap;
use std::sync::Arc;

use crate::assets::TextureData;
use crate::collision::{nearest_hit, Ray, RayHit};
use crate::data::NearEarthObjectRecord;
use crate::mapping::GeometricDescriptor;
use crate::scene::{CentralBody, Color, NeoKey, SceneObject};

/// The scene graph
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<NeoKey, SceneObject>,
    central_body: Option<CentralBody>,
    neo_texture: Option<Arc<TextureData>>,
    generation: u64,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every NEO and start a new generation
    ///
    /// The central body and loaded textures survive a dataset change.
    pub fn clear_objects(&mut self) {
        self.objects.clear();
        self.generation += 1;
    }

    /// Remove everything, including the central body
    pub fn clear(&mut self) {
        self.clear_objects();
        self.central_body = None;
        self.neo_texture = None;
    }

    /// Number of dataset rebuilds so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Add a NEO built from its mapped geometry
    pub fn insert(
        &mut self,
        descriptor: &GeometricDescriptor,
        color: Color,
        record: Arc<NearEarthObjectRecord>,
    ) -> NeoKey {
        let texture = self.neo_texture.clone();
        self.objects.insert_with_key(|key| {
            let mut object = SceneObject::new(
                key,
                descriptor.position,
                descriptor.radius,
                descriptor.class,
                color,
                record,
            );
            object.visual.texture = texture;
            object
        })
    }

    /// Look up an object
    pub fn get(&self, key: NeoKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Whether `key` refers to a live object
    pub fn contains(&self, key: NeoKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of NEO objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no NEO objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All NEO objects
    pub fn objects(&self) -> impl Iterator<Item = (NeoKey, &SceneObject)> {
        self.objects.iter()
    }

    /// Nearest hit-test volume along `ray`
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit<NeoKey>> {
        nearest_hit(
            ray,
            self.objects
                .values()
                .map(|object| (object.hit_volume.body, object.hit_volume.sphere)),
        )
    }

    /// Recolor a visual body, returning the color it had before
    pub fn set_body_color(&mut self, key: NeoKey, color: Color) -> Option<Color> {
        self.objects.get_mut(key).map(|object| object.visual.set_color(color))
    }

    /// Attach the shared NEO texture to current and future bodies
    pub fn attach_neo_texture(&mut self, texture: Arc<TextureData>) {
        for object in self.objects.values_mut() {
            object.visual.texture = Some(Arc::clone(&texture));
        }
        self.neo_texture = Some(texture);
    }

    /// The central body, once its resource has resolved
    pub fn central_body(&self) -> Option<&CentralBody> {
        self.central_body.as_ref()
    }

    /// Place the central body
    pub fn set_central_body(&mut self, body: CentralBody) {
        self.central_body = Some(body);
    }
}
