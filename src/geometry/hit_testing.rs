use geo::{Contains, Coord, Intersects, LineString, Point, Polygon, Rect};

use super::Position;

/// Whether `point` lies strictly inside the ring. The ring may be open or closed.
pub fn point_in_ring(point: Position, ring: &[Position]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let exterior: LineString<f64> = ring.iter().map(|p| (p[0], p[1])).collect();
    Polygon::new(exterior, Vec::new()).contains(&Point::new(point[0], point[1]))
}

/// Whether `point` lies inside or on the edge of the box spanned by two corners.
pub fn point_in_box(point: Position, a: Position, b: Position) -> bool {
    let rect = Rect::new(Coord { x: a[0], y: a[1] }, Coord { x: b[0], y: b[1] });
    rect.intersects(&Point::new(point[0], point[1]))
}
