//! Spatial mapper
//!
//! Pure functions turning one [`NearEarthObjectRecord`] into a render-ready
//! [`GeometricDescriptor`]. Sizes are normalized against the central body:
//! Earth's real diameter maps to the central body's render radius of one
//! unit, magnified so that NEOs stay visible, and clamped from below so that
//! tiny objects stay pickable.
//!
//! Positions are synthetic. The distance comes from the first close approach;
//! the direction is drawn uniformly over the sphere because the feed carries
//! no orbital geometry.

use rand::Rng;
use thiserror::Error;

use crate::data::NearEarthObjectRecord;
use crate::foundation::math::Vec3;

/// Earth's diameter in kilometers, the reference for one render unit of radius
pub const EARTH_DIAMETER_KM: f64 = 12_742.0;

/// Magnification applied to NEO sizes
pub const NEO_SCALE_FACTOR: f64 = 100.0;

/// Smallest render radius a NEO may have
pub const MIN_RENDER_RADIUS: f32 = 0.5;

/// Kilometers of miss distance per render unit
pub const KM_PER_RENDER_UNIT: f64 = 1_000_000.0;

/// Mapping errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The record lacks a field the mapper needs
    #[error("Malformed record {id:?}: {reason}")]
    MalformedRecord {
        /// Identifier of the offending record (may be empty)
        id: String,
        /// What was missing or invalid
        reason: &'static str,
    },
}

impl MapError {
    fn malformed(record: &NearEarthObjectRecord, reason: &'static str) -> Self {
        Self::MalformedRecord {
            id: record.id.clone(),
            reason,
        }
    }
}

/// Categorical hazard class. There is no intermediate severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardClass {
    /// Potentially hazardous asteroid
    Hazard,
    /// Everything else
    Benign,
}

/// Render-ready geometry for one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricDescriptor {
    /// Visual radius in render units, at least [`MIN_RENDER_RADIUS`]
    pub radius: f32,
    /// Hazard class, resolved to a color by the scene palette
    pub class: HazardClass,
    /// Position relative to the central body
    pub position: Vec3,
}

/// Map one record to its geometry
///
/// Radius and class are deterministic; the direction of `position` is drawn
/// from `rng`, its magnitude is not.
pub fn map_record<R: Rng + ?Sized>(
    record: &NearEarthObjectRecord,
    rng: &mut R,
) -> Result<GeometricDescriptor, MapError> {
    let diameter_m = record
        .max_diameter_m()
        .ok_or_else(|| MapError::malformed(record, "missing estimated maximum diameter"))?;
    if !diameter_m.is_finite() || diameter_m < 0.0 {
        return Err(MapError::malformed(record, "diameter is not a non-negative number"));
    }

    let distance = approach_distance(record)?;

    Ok(GeometricDescriptor {
        radius: render_radius(diameter_m),
        class: hazard_class(record),
        position: random_unit_direction(rng) * distance,
    })
}

/// Render radius for a diameter given in meters
pub fn render_radius(diameter_m: f64) -> f32 {
    let diameter_km = diameter_m / 1000.0;
    let scaled = (diameter_km / EARTH_DIAMETER_KM * NEO_SCALE_FACTOR) as f32;
    scaled.max(MIN_RENDER_RADIUS)
}

/// Hazard class from the record's hazard flag
pub fn hazard_class(record: &NearEarthObjectRecord) -> HazardClass {
    if record.is_potentially_hazardous_asteroid {
        HazardClass::Hazard
    } else {
        HazardClass::Benign
    }
}

/// Distance from the central body in render units
pub fn approach_distance(record: &NearEarthObjectRecord) -> Result<f32, MapError> {
    if record.first_approach().is_none() {
        return Err(MapError::malformed(record, "no close-approach entry"));
    }
    let miss_km = record
        .miss_distance_km()
        .ok_or_else(|| MapError::malformed(record, "missing miss distance in kilometers"))?;
    if !miss_km.is_finite() || miss_km < 0.0 {
        return Err(MapError::malformed(record, "miss distance is not a non-negative number"));
    }
    Ok((miss_km / KM_PER_RENDER_UNIT) as f32)
}

/// Direction drawn uniformly over the unit sphere
///
/// The polar angle is `acos(2u - 1)` so that equal areas receive equal
/// probability; sampling the angle itself would bunch points at the poles.
pub fn random_unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let azimuth = std::f64::consts::TAU * rng.gen::<f64>();
    let polar = (2.0 * rng.gen::<f64>() - 1.0).acos();

    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
    Vec3::new(
        (sin_polar * cos_azimuth) as f32,
        (sin_polar * sin_azimuth) as f32,
        cos_polar as f32,
    )
}
