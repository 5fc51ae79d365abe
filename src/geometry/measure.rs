//! Spherical measurements over `[longitude, latitude]` positions, on top of `geo`.

use geo::{
    Bearing, ChamberlainDuquetteArea, Destination, Distance, Haversine, LineString, Point,
    Polygon,
};

use super::Position;

fn point(p: Position) -> Point<f64> {
    Point::new(p[0], p[1])
}

/// Great-circle distance between two positions.
pub fn haversine_km(a: Position, b: Position) -> f64 {
    Haversine::distance(point(a), point(b)) / 1000.0
}

/// Total length of a polyline.
pub fn path_length_km(path: &[Position]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

/// Initial bearing from `a` to `b`, degrees in `[0, 360)`.
pub fn bearing_deg(a: Position, b: Position) -> f64 {
    Haversine::bearing(point(a), point(b)).rem_euclid(360.0)
}

/// Angle at `vertex` between the segments towards `a` and `b`, in `[0, 180]`.
pub fn angle_deg(a: Position, vertex: Position, b: Position) -> f64 {
    let diff = (bearing_deg(vertex, a) - bearing_deg(vertex, b)).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Position reached by travelling `distance_km` from `origin` along `bearing`.
pub fn destination(origin: Position, distance_km: f64, bearing: f64) -> Position {
    let target = Haversine::destination(point(origin), bearing, distance_km * 1000.0);
    [target.x(), target.y()]
}

/// Closed ring of `steps` vertices approximating a circle on the sphere.
pub fn circle_ring(center: Position, radius_km: f64, steps: usize) -> Vec<Position> {
    let mut ring: Vec<Position> = (0..steps)
        .map(|i| destination(center, radius_km, 360.0 * i as f64 / steps as f64))
        .collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    ring
}

/// Human readable distance.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.2} km", km)
    }
}

/// Area enclosed by a ring on the sphere. The ring may be open or closed.
pub fn ring_area_km2(ring: &[Position]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let exterior: LineString<f64> = ring.iter().map(|p| (p[0], p[1])).collect();
    Polygon::new(exterior, Vec::new()).chamberlain_duquette_unsigned_area() / 1_000_000.0
}
