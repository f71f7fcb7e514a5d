//! Scene builder
//!
//! Replaces the scene's NEO objects with one object per mappable record of
//! the selected feed date.

use rand::Rng;
use std::sync::Arc;

use crate::config::PaletteConfig;
use crate::data::{DateSelection, NearEarthObjectRecord, NeoFeed};
use crate::mapping::{self, HazardClass};
use crate::scene::{Color, Scene};

/// How a build resolved its date selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The selected date held a record list
    Built,
    /// The selected date was absent or not a list; the scene is empty
    EmptyOrMissingDateSelection,
}

/// Summary of one rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Resolved date key, if any
    pub date: Option<String>,
    /// Objects added to the scene
    pub created: usize,
    /// Records skipped as malformed
    pub skipped: usize,
    /// How the selection resolved
    pub outcome: BuildOutcome,
}

/// Builds scene objects from feed records
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    hazard: Color,
    benign: Color,
}

impl SceneBuilder {
    /// Builder coloring objects from `palette`
    pub fn new(palette: &PaletteConfig) -> Self {
        Self {
            hazard: palette.hazard,
            benign: palette.benign,
        }
    }

    /// Color for a hazard class
    pub fn color_for(&self, class: HazardClass) -> Color {
        match class {
            HazardClass::Hazard => self.hazard,
            HazardClass::Benign => self.benign,
        }
    }

    /// Clear `scene` and fill it from the selected date of `feed`
    pub fn build<R: Rng + ?Sized>(
        &self,
        scene: &mut Scene,
        feed: &NeoFeed,
        selection: &DateSelection,
        rng: &mut R,
    ) -> BuildReport {
        scene.clear_objects();

        let Some((date, entries)) = feed.select(selection) else {
            log::warn!("No record list for date selection {:?}, scene is empty", selection);
            return BuildReport {
                date: None,
                created: 0,
                skipped: 0,
                outcome: BuildOutcome::EmptyOrMissingDateSelection,
            };
        };

        let mut created = 0;
        let mut skipped = 0;
        for entry in entries {
            let record: NearEarthObjectRecord = match serde_json::from_value(entry.clone()) {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Skipping unparsable record on {}: {}", date, e);
                    skipped += 1;
                    continue;
                }
            };

            match mapping::map_record(&record, rng) {
                Ok(descriptor) => {
                    scene.insert(&descriptor, self.color_for(descriptor.class), Arc::new(record));
                    created += 1;
                }
                Err(e) => {
                    log::debug!("Skipping record on {}: {}", date, e);
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Built scene generation {} for {}: {} objects, {} skipped",
            scene.generation(),
            date,
            created,
            skipped
        );

        BuildReport {
            date: Some(date.to_string()),
            created,
            skipped,
            outcome: BuildOutcome::Built,
        }
    }
}
