//! Interaction resolver
//!
//! Resolves pointer rays against the scene's hit-test volumes. Hover swaps
//! the hovered body's color for the highlight color and restores it when the
//! pointer moves on; a click hands the nearest object's record to the detail
//! sink.

use crate::collision::Ray;
use crate::interaction::{DetailSink, HighlightState, HoverTransition};
use crate::scene::{Color, NeoKey, Scene};

/// Owns the highlight state and applies hover and selection
#[derive(Debug, Clone)]
pub struct InteractionResolver {
    state: HighlightState,
    highlight: Color,
}

impl InteractionResolver {
    /// Resolver painting hovered bodies with `highlight`
    pub fn new(highlight: Color) -> Self {
        Self {
            state: HighlightState::Idle,
            highlight,
        }
    }

    /// Current highlight state
    pub fn state(&self) -> HighlightState {
        self.state
    }

    /// Resolve hover for a pointer ray; `None` means the pointer is off the surface
    pub fn hover(&mut self, scene: &mut Scene, ray: Option<&Ray>) -> HoverTransition {
        self.drop_stale(scene);

        let hit = ray.and_then(|ray| scene.raycast(ray)).map(|hit| hit.key);
        let transition = match (self.state, hit) {
            (HighlightState::Idle, None) => return HoverTransition::Unchanged,
            (HighlightState::Hovering { object, .. }, Some(key)) if object == key => {
                return HoverTransition::Unchanged
            }
            (HighlightState::Idle, Some(key)) => {
                self.highlight_object(scene, key);
                HoverTransition::Entered(key)
            }
            (HighlightState::Hovering { object, original_color }, Some(key)) => {
                scene.set_body_color(object, original_color);
                self.highlight_object(scene, key);
                HoverTransition::Changed { from: object, to: key }
            }
            (HighlightState::Hovering { object, original_color }, None) => {
                scene.set_body_color(object, original_color);
                self.state = HighlightState::Idle;
                HoverTransition::Left(object)
            }
        };

        log::debug!("Hover {:?}", transition);
        transition
    }

    /// Emit the record of the nearest object along `ray`
    ///
    /// A miss emits nothing.
    pub fn select(&self, scene: &Scene, ray: &Ray, sink: &mut dyn DetailSink) -> Option<NeoKey> {
        let hit = scene.raycast(ray)?;
        let object = scene.get(hit.key)?;

        log::info!("Selected {} ({})", object.record.name, object.record.id);
        sink.show(object.record.clone());
        Some(hit.key)
    }

    /// Restore any highlighted body and return to idle
    pub fn reset(&mut self, scene: &mut Scene) {
        if let HighlightState::Hovering { object, original_color } = self.state {
            scene.set_body_color(object, original_color);
        }
        self.state = HighlightState::Idle;
    }

    fn highlight_object(&mut self, scene: &mut Scene, key: NeoKey) {
        self.state = match scene.set_body_color(key, self.highlight) {
            Some(original_color) => HighlightState::Hovering {
                object: key,
                original_color,
            },
            None => HighlightState::Idle,
        };
    }

    /// Forget a hovered object that a rebuild removed
    fn drop_stale(&mut self, scene: &Scene) {
        if let HighlightState::Hovering { object, .. } = self.state {
            if !scene.contains(object) {
                log::debug!("Hovered object left the scene, dropping highlight");
                self.state = HighlightState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NearEarthObjectRecord;
    use crate::foundation::math::Vec3;
    use crate::mapping::{GeometricDescriptor, HazardClass};
    use std::sync::Arc;

    const BENIGN: Color = Color::from_hex(0x00ff00);
    const HIGHLIGHT: Color = Color::from_hex(0xffff00);

    fn scene_with(positions: &[Vec3]) -> (Scene, Vec<NeoKey>) {
        let mut scene = Scene::new();
        let keys = positions
            .iter()
            .enumerate()
            .map(|(i, position)| {
                let record = NearEarthObjectRecord {
                    id: i.to_string(),
                    ..Default::default()
                };
                let descriptor = GeometricDescriptor {
                    radius: 0.5,
                    class: HazardClass::Benign,
                    position: *position,
                };
                scene.insert(&descriptor, BENIGN, Arc::new(record))
            })
            .collect();
        (scene, keys)
    }

    fn ray_at(target: Vec3) -> Ray {
        Ray::towards(Vec3::new(0.0, 0.0, 10.0), target)
    }

    fn highlighted(scene: &Scene) -> Vec<NeoKey> {
        scene
            .objects()
            .filter(|(_, object)| object.visual.is_recolored())
            .map(|(key, _)| key)
            .collect()
    }

    #[test]
    fn test_enter_change_leave() {
        let a = Vec3::new(-3.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 0.0, 0.0);
        let (mut scene, keys) = scene_with(&[a, b]);
        let mut resolver = InteractionResolver::new(HIGHLIGHT);

        assert_eq!(resolver.hover(&mut scene, Some(&ray_at(a))), HoverTransition::Entered(keys[0]));
        assert_eq!(scene.get(keys[0]).unwrap().visual.color(), HIGHLIGHT);
        assert_eq!(resolver.hover(&mut scene, Some(&ray_at(a))), HoverTransition::Unchanged);

        assert_eq!(
            resolver.hover(&mut scene, Some(&ray_at(b))),
            HoverTransition::Changed { from: keys[0], to: keys[1] }
        );
        assert_eq!(scene.get(keys[0]).unwrap().visual.color(), BENIGN);
        assert_eq!(highlighted(&scene), vec![keys[1]]);

        let miss = ray_at(Vec3::new(0.0, 40.0, 0.0));
        assert_eq!(resolver.hover(&mut scene, Some(&miss)), HoverTransition::Left(keys[1]));
        assert!(highlighted(&scene).is_empty());
        assert_eq!(resolver.state(), HighlightState::Idle);
    }

    #[test]
    fn test_miss_while_idle_changes_nothing() {
        let (mut scene, _) = scene_with(&[Vec3::zeros()]);
        let mut resolver = InteractionResolver::new(HIGHLIGHT);

        let miss = ray_at(Vec3::new(30.0, 0.0, 0.0));
        assert_eq!(resolver.hover(&mut scene, Some(&miss)), HoverTransition::Unchanged);
        assert_eq!(resolver.hover(&mut scene, None), HoverTransition::Unchanged);
        assert!(highlighted(&scene).is_empty());
    }

    #[test]
    fn test_pointer_off_surface_clears_hover() {
        let (mut scene, keys) = scene_with(&[Vec3::zeros()]);
        let mut resolver = InteractionResolver::new(HIGHLIGHT);

        resolver.hover(&mut scene, Some(&ray_at(Vec3::zeros())));
        assert_eq!(resolver.hover(&mut scene, None), HoverTransition::Left(keys[0]));
        assert!(highlighted(&scene).is_empty());
    }

    #[test]
    fn test_select_emits_nearest_record_once() {
        let near = Vec3::new(0.0, 0.0, 4.0);
        let (scene, keys) = scene_with(&[Vec3::zeros(), near]);
        let resolver = InteractionResolver::new(HIGHLIGHT);
        let mut shown = Vec::new();
        let mut sink = |record: Arc<NearEarthObjectRecord>| shown.push(record.id.clone());

        let picked = resolver.select(&scene, &ray_at(Vec3::zeros()), &mut sink);
        let missed = resolver.select(&scene, &ray_at(Vec3::new(0.0, -50.0, 0.0)), &mut sink);

        assert_eq!(picked, Some(keys[1]));
        assert_eq!(missed, None);
        assert_eq!(shown, vec!["1".to_string()]);
    }

    #[test]
    fn test_stale_hover_is_dropped_without_recoloring() {
        let (mut scene, _) = scene_with(&[Vec3::zeros()]);
        let mut resolver = InteractionResolver::new(HIGHLIGHT);
        resolver.hover(&mut scene, Some(&ray_at(Vec3::zeros())));

        scene.clear_objects();
        let descriptor = GeometricDescriptor {
            radius: 0.5,
            class: HazardClass::Benign,
            position: Vec3::new(8.0, 0.0, 0.0),
        };
        scene.insert(&descriptor, BENIGN, Arc::new(NearEarthObjectRecord::default()));

        let miss = ray_at(Vec3::new(-30.0, 0.0, 0.0));
        assert_eq!(resolver.hover(&mut scene, Some(&miss)), HoverTransition::Unchanged);
        assert_eq!(resolver.state(), HighlightState::Idle);
        assert!(highlighted(&scene).is_empty());
    }

    #[test]
    fn test_reset_restores_color() {
        let (mut scene, keys) = scene_with(&[Vec3::zeros()]);
        let mut resolver = InteractionResolver::new(HIGHLIGHT);
        resolver.hover(&mut scene, Some(&ray_at(Vec3::zeros())));

        resolver.reset(&mut scene);

        assert_eq!(scene.get(keys[0]).unwrap().visual.color(), BENIGN);
        assert_eq!(resolver.state(), HighlightState::Idle);
    }
}
