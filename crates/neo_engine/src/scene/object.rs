//! Scene objects: visual bodies paired with hit-test volumes

use std::sync::Arc;

use crate::assets::TextureData;
use crate::collision::BoundingSphere;
use crate::data::NearEarthObjectRecord;
use crate::foundation::math::Vec3;
use crate::mapping::HazardClass;
use crate::scene::Color;

slotmap::new_key_type! {
    /// Stable handle of a [`SceneObject`] in the scene arena
    pub struct NeoKey;
}

/// Hit-test volume radius as a multiple of the visual radius
pub const HIT_VOLUME_MULTIPLIER: f32 = 3.0;

/// Render radius of the central body, the unit of all scene sizes
pub const CENTRAL_BODY_RADIUS: f32 = 1.0;

/// Tint of a textured central body; white leaves the texture unchanged
pub const TEXTURE_TINT: Color = Color::from_hex(0x00ff_ffff);

/// The rendered sphere of a NEO
#[derive(Debug, Clone)]
pub struct VisualBody {
    /// Center in world space
    pub position: Vec3,
    /// Radius in render units
    pub radius: f32,
    /// Surface texture, once loaded
    pub texture: Option<Arc<TextureData>>,
    color: Color,
    base_color: Color,
}

impl VisualBody {
    fn new(position: Vec3, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            texture: None,
            color,
            base_color: color,
        }
    }

    /// Color currently drawn
    pub fn color(&self) -> Color {
        self.color
    }

    /// Color assigned at construction from the hazard class
    pub fn base_color(&self) -> Color {
        self.base_color
    }

    /// Whether the drawn color differs from the construction color
    pub fn is_recolored(&self) -> bool {
        self.color != self.base_color
    }

    pub(crate) fn set_color(&mut self, color: Color) -> Color {
        std::mem::replace(&mut self.color, color)
    }
}

/// Invisible picking proxy for a visual body
///
/// Never drawn. Shares the body's center and is always larger than it.
#[derive(Debug, Clone, Copy)]
pub struct HitVolume {
    /// Picking sphere
    pub sphere: BoundingSphere,
    /// Back-reference to the owning object
    pub body: NeoKey,
}

/// A NEO in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// What gets drawn
    pub visual: VisualBody,
    /// What gets picked
    pub hit_volume: HitVolume,
    /// Hazard class the color was derived from
    pub class: HazardClass,
    /// Originating feed record
    pub record: Arc<NearEarthObjectRecord>,
}

impl SceneObject {
    pub(crate) fn new(
        key: NeoKey,
        position: Vec3,
        radius: f32,
        class: HazardClass,
        color: Color,
        record: Arc<NearEarthObjectRecord>,
    ) -> Self {
        Self {
            visual: VisualBody::new(position, radius, color),
            hit_volume: HitVolume {
                sphere: BoundingSphere::new(position, radius * HIT_VOLUME_MULTIPLIER),
                body: key,
            },
            class,
            record,
        }
    }
}

/// The central body at the origin
#[derive(Debug, Clone)]
pub struct CentralBody {
    /// Always [`CENTRAL_BODY_RADIUS`]
    pub radius: f32,
    /// Flat color, used when no texture is present
    pub color: Color,
    /// Surface texture
    pub texture: Option<Arc<TextureData>>,
}

impl CentralBody {
    /// Central body carrying its surface texture
    pub fn textured(texture: Arc<TextureData>) -> Self {
        Self {
            radius: CENTRAL_BODY_RADIUS,
            color: TEXTURE_TINT,
            texture: Some(texture),
        }
    }

    /// Central body with a flat default material
    pub fn flat(color: Color) -> Self {
        Self {
            radius: CENTRAL_BODY_RADIUS,
            color,
            texture: None,
        }
    }

    /// World-space center
    pub fn position(&self) -> Vec3 {
        Vec3::zeros()
    }
}
