//! Detail display collaborator
//!
//! The engine hands the record of a clicked object to a [`DetailSink`] and
//! leaves presentation to it.

use std::fmt;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::data::NearEarthObjectRecord;

/// Receives the record of each selected object
pub trait DetailSink {
    /// Present `record`
    fn show(&mut self, record: Arc<NearEarthObjectRecord>);
}

impl<F> DetailSink for F
where
    F: FnMut(Arc<NearEarthObjectRecord>),
{
    fn show(&mut self, record: Arc<NearEarthObjectRecord>) {
        self(record)
    }
}

/// Forwards selections to another thread
#[derive(Debug, Clone)]
pub struct ChannelSink(pub Sender<Arc<NearEarthObjectRecord>>);

impl DetailSink for ChannelSink {
    fn show(&mut self, record: Arc<NearEarthObjectRecord>) {
        if self.0.send(record).is_err() {
            log::warn!("Detail receiver is gone, selection dropped");
        }
    }
}

/// The fields a detail display shows for one object
#[derive(Debug, Clone, PartialEq)]
pub struct DetailSummary {
    /// Display name
    pub name: String,
    /// Upper diameter estimate in meters
    pub diameter_m: Option<f64>,
    /// Relative speed at closest approach in km/h
    pub relative_speed_kph: Option<f64>,
    /// Closest approach timestamp
    pub closest_approach: Option<String>,
    /// Miss distance in kilometers
    pub distance_km: Option<f64>,
    /// Absolute magnitude H
    pub absolute_magnitude: Option<f64>,
}

impl DetailSummary {
    /// Summarize a record
    pub fn from_record(record: &NearEarthObjectRecord) -> Self {
        Self {
            name: record.name.clone(),
            diameter_m: record.max_diameter_m(),
            relative_speed_kph: record.relative_velocity_kph(),
            closest_approach: record.approach_timestamp().map(str::to_string),
            distance_km: record.miss_distance_km(),
            absolute_magnitude: record.absolute_magnitude_h,
        }
    }
}

struct Fixed(Option<f64>);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.2}", value),
            None => f.write_str("unknown"),
        }
    }
}

impl fmt::Display for DetailSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Diameter: {} meters", Fixed(self.diameter_m))?;
        writeln!(f, "Relative Speed: {} km/h", Fixed(self.relative_speed_kph))?;
        writeln!(
            f,
            "Closest Approach: {}",
            self.closest_approach.as_deref().unwrap_or("unknown")
        )?;
        write!(f, "Distance from Earth: {} km", Fixed(self.distance_km))?;
        if let Some(magnitude) = self.absolute_magnitude {
            write!(f, "\nAbsolute Magnitude: {:.2}", magnitude)?;
        }
        Ok(())
    }
}
