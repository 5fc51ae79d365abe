use serde::{Deserialize, Serialize};

use crate::mode::{SelectionMode, ToolMode};
use crate::view::ViewState;

/// Relative to the page on the web, to the working directory natively.
pub const DEFAULT_DATASET_URL: &str = "assets/clusters.json";

/// User-tunable settings, restored from eframe storage between runs.
///
/// Only settings live here; drawn geometry is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct MapConfig {
    pub dataset_url: String,
    /// Radius of a rendered dataset point, in screen pixels
    pub point_radius_px: f32,
    /// How close the pointer must be to a point to pick it
    pub pick_radius_px: f32,
    /// Upper bound on dataset fetch attempts
    pub max_fetch_attempts: u32,
    pub initial_view: ViewState,
    /// Tool mode token applied at startup, e.g. `"draw-polygon"`
    pub initial_tool: String,
    /// Selection mode token applied at startup, e.g. `"none"`
    pub initial_selection: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_owned(),
            point_radius_px: 2.5,
            pick_radius_px: 6.0,
            max_fetch_attempts: 3,
            initial_view: ViewState::default(),
            initial_tool: ToolMode::DrawPolygon.token().to_owned(),
            initial_selection: SelectionMode::None.token().to_owned(),
        }
    }
}

impl MapConfig {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}
