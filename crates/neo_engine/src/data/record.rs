//! NeoWs record types
//!
//! Every field is optional at parse time. A record that lacks what the
//! mapper needs is rejected there, one record at a time, instead of failing
//! the whole feed document.

use serde::{Deserialize, Serialize};

/// A numeric field that NeoWs may encode as a JSON number or a decimal string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    /// Plain JSON number
    Number(f64),
    /// Decimal string such as `"5012345.678"`
    Text(String),
}

impl NumericValue {
    /// Numeric value, or `None` for unparsable text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A single near-Earth object as delivered by the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearEarthObjectRecord {
    /// Feed identifier
    pub id: String,
    /// Reference identifier (usually equal to `id`)
    pub neo_reference_id: Option<String>,
    /// Display name, e.g. `"(2023 QK1)"`
    pub name: String,
    /// JPL small-body database link
    pub nasa_jpl_url: Option<String>,
    /// Absolute magnitude H
    pub absolute_magnitude_h: Option<f64>,
    /// Estimated diameter ranges
    pub estimated_diameter: Option<EstimatedDiameter>,
    /// Potentially hazardous asteroid flag
    pub is_potentially_hazardous_asteroid: bool,
    /// Close approaches, nearest date first
    pub close_approach_data: Vec<CloseApproach>,
    /// Sentry impact-monitoring flag
    pub is_sentry_object: Option<bool>,
}

/// Diameter ranges in the units NeoWs reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatedDiameter {
    /// Range in kilometers
    pub kilometers: Option<DiameterRange>,
    /// Range in meters
    pub meters: Option<DiameterRange>,
}

/// Minimum and maximum estimated diameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiameterRange {
    /// Lower estimate
    pub estimated_diameter_min: Option<NumericValue>,
    /// Upper estimate
    pub estimated_diameter_max: Option<NumericValue>,
}

/// One close-approach entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloseApproach {
    /// Approach date, `YYYY-MM-DD`
    pub close_approach_date: Option<String>,
    /// Full approach timestamp, `YYYY-Mon-DD HH:MM`
    pub close_approach_date_full: Option<String>,
    /// Approach epoch in milliseconds
    pub epoch_date_close_approach: Option<i64>,
    /// Velocity relative to the orbiting body
    pub relative_velocity: Option<RelativeVelocity>,
    /// Miss distance at closest approach
    pub miss_distance: Option<MissDistance>,
    /// Body being approached, normally `"Earth"`
    pub orbiting_body: Option<String>,
}

/// Relative velocity in several units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeVelocity {
    /// km/s
    pub kilometers_per_second: Option<NumericValue>,
    /// km/h
    pub kilometers_per_hour: Option<NumericValue>,
    /// mph
    pub miles_per_hour: Option<NumericValue>,
}

/// Miss distance in several units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissDistance {
    /// Astronomical units
    pub astronomical: Option<NumericValue>,
    /// Lunar distances
    pub lunar: Option<NumericValue>,
    /// Kilometers
    pub kilometers: Option<NumericValue>,
    /// Miles
    pub miles: Option<NumericValue>,
}

impl NearEarthObjectRecord {
    /// Upper diameter estimate in meters
    pub fn max_diameter_m(&self) -> Option<f64> {
        self.estimated_diameter
            .as_ref()?
            .meters
            .as_ref()?
            .estimated_diameter_max
            .as_ref()?
            .as_f64()
    }

    /// First close-approach entry, if any
    pub fn first_approach(&self) -> Option<&CloseApproach> {
        self.close_approach_data.first()
    }

    /// Miss distance of the first approach in kilometers
    pub fn miss_distance_km(&self) -> Option<f64> {
        self.first_approach()?.miss_distance.as_ref()?.kilometers.as_ref()?.as_f64()
    }

    /// Relative velocity of the first approach in km/h
    pub fn relative_velocity_kph(&self) -> Option<f64> {
        self.first_approach()?
            .relative_velocity
            .as_ref()?
            .kilometers_per_hour
            .as_ref()?
            .as_f64()
    }

    /// Full timestamp of the first approach
    pub fn approach_timestamp(&self) -> Option<&str> {
        self.first_approach()?.close_approach_date_full.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "2465633",
        "neo_reference_id": "2465633",
        "name": "465633 (2009 JR5)",
        "absolute_magnitude_h": 20.44,
        "estimated_diameter": {
            "meters": { "estimated_diameter_min": 225.88, "estimated_diameter_max": 505.09 }
        },
        "is_potentially_hazardous_asteroid": true,
        "close_approach_data": [{
            "close_approach_date": "2015-09-08",
            "close_approach_date_full": "2015-Sep-08 20:28",
            "epoch_date_close_approach": 1441744080000,
            "relative_velocity": { "kilometers_per_second": "18.1279360862", "kilometers_per_hour": "65260.5699103704" },
            "miss_distance": { "astronomical": "0.3027469457", "kilometers": "45290298.225725659" },
            "orbiting_body": "Earth"
        }],
        "is_sentry_object": false
    }"#;

    #[test]
    fn test_parses_neows_string_encoded_numbers() {
        let record: NearEarthObjectRecord = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(record.name, "465633 (2009 JR5)");
        assert_eq!(record.max_diameter_m(), Some(505.09));
        assert!((record.miss_distance_km().unwrap() - 45_290_298.225_725_66).abs() < 1e-6);
        assert!((record.relative_velocity_kph().unwrap() - 65_260.569_910_370_4).abs() < 1e-6);
        assert_eq!(record.approach_timestamp(), Some("2015-Sep-08 20:28"));
    }

    #[test]
    fn test_missing_sections_parse_as_absent() {
        let record: NearEarthObjectRecord = serde_json::from_str(r#"{ "id": "1", "name": "bare" }"#).unwrap();

        assert!(record.max_diameter_m().is_none());
        assert!(record.first_approach().is_none());
        assert!(!record.is_potentially_hazardous_asteroid);
    }

    #[test]
    fn test_unparsable_text_is_none() {
        assert_eq!(NumericValue::Text("n/a".into()).as_f64(), None);
        assert_eq!(NumericValue::Text(" 12.5 ".into()).as_f64(), Some(12.5));
    }
}
