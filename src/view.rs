use std::f64::consts::PI;

use egui::{Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

use crate::geometry::Position;

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Camera over a Web-Mercator map.
///
/// `pitch` and `bearing` are carried for the host but the map is drawn
/// top-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub max_zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            longitude: -74.0,
            latitude: 40.7,
            zoom: 11.0,
            max_zoom: 16.0,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}

impl ViewState {
    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Position in world pixels at the current zoom.
    fn to_world(&self, position: Position) -> [f64; 2] {
        let size = self.world_size();
        let lat = position[1].clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (position[0] + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        [x, y]
    }

    fn from_world(&self, world: [f64; 2]) -> Position {
        let size = self.world_size();
        let lng = world[0] / size * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * world[1] / size);
        let lat = n.sinh().atan().to_degrees();
        [lng, lat]
    }

    /// Screen position of `position` when the map fills `rect`.
    pub fn project(&self, position: Position, rect: Rect) -> Pos2 {
        let [wx, wy] = self.to_world(position);
        let [cx, cy] = self.to_world([self.longitude, self.latitude]);
        let center = rect.center();
        pos2(
            center.x + (wx - cx) as f32,
            center.y + (wy - cy) as f32,
        )
    }

    /// Inverse of [`project`](Self::project).
    pub fn unproject(&self, screen: Pos2, rect: Rect) -> Position {
        let [cx, cy] = self.to_world([self.longitude, self.latitude]);
        let center = rect.center();
        self.from_world([
            cx + f64::from(screen.x - center.x),
            cy + f64::from(screen.y - center.y),
        ])
    }

    /// Moves the camera so the map follows a pointer drag of `delta` pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let [cx, cy] = self.to_world([self.longitude, self.latitude]);
        let [lng, lat] = self.from_world([cx - f64::from(delta.x), cy - f64::from(delta.y)]);
        self.longitude = (lng + 180.0).rem_euclid(360.0) - 180.0;
        self.latitude = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    }

    /// Zooms by `delta` levels keeping the point under `anchor` fixed.
    pub fn zoom_around(&mut self, delta: f64, anchor: Pos2, rect: Rect) {
        let target = (self.zoom + delta).clamp(0.0, self.max_zoom);
        if target == self.zoom {
            return;
        }
        let fixed = self.unproject(anchor, rect);
        self.zoom = target;
        let drift = anchor - self.project(fixed, rect);
        self.pan(drift);
    }
}
