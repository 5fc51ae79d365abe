use std::collections::HashMap;

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use crate::geometry::{Feature, Geometry, Position};
use crate::layer::{EditableGeometryLayer, LayerDescriptor, LayerList, PointLayer, SelectionLayer};
use crate::tools::{SketchPreview, SketchShape};
use crate::view::ViewState;

const GRID_STEPS: [f64; 12] = [10.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005, 0.002];
const MIN_GRID_SPACING_PX: f32 = 80.0;

/// Fill colors of one point layer, rebuilt only when the layer's trigger moves.
#[derive(Debug)]
struct ColorBuffer {
    trigger: u64,
    fills: Vec<Color32>,
}

/// Draws a [`LayerList`] into a painter, bottom layer first.
#[derive(Debug)]
pub struct MapRenderer {
    point_radius: f32,
    background: Color32,
    grid: Color32,
    color_buffers: HashMap<String, ColorBuffer>,
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new(2.5)
    }
}

impl MapRenderer {
    pub fn new(point_radius: f32) -> Self {
        Self {
            point_radius,
            background: Color32::from_gray(24),
            grid: Color32::from_gray(48),
            color_buffers: HashMap::new(),
        }
    }

    /// Renders the current frame
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with, clipped to `rect`
    ///     rect (egui::Rect): The screen area covered by the map
    ///     view (ViewState): Camera used to project positions
    ///     layers (LayerList): Composed layers, drawn in order
    ///     preview (SketchPreview): In-progress shape of the active tool
    pub fn render(
        &mut self,
        painter: &Painter,
        rect: Rect,
        view: &ViewState,
        layers: &LayerList,
        preview: Option<&SketchPreview>,
    ) {
        painter.rect_filled(rect, 0.0, self.background);
        self.draw_grid(painter, rect, view);

        let mut selection = None;
        for layer in layers.layers() {
            match layer {
                LayerDescriptor::Points(points) => self.draw_points(painter, rect, view, points),
                LayerDescriptor::EditableGeometry(editable) => {
                    self.draw_features(painter, rect, view, editable)
                }
                LayerDescriptor::Selection(overlay) => selection = Some(overlay),
            }
        }

        if let Some(preview) = preview {
            let (fill, line) = match selection.filter(|s| s.selection.is_active()) {
                Some(overlay) => (overlay.tentative_fill, overlay.tentative_line),
                None => (Color32::from_rgba_unmultiplied(255, 255, 255, 30), Color32::WHITE),
            };
            let width = selection.map_or(2.0, |s: &SelectionLayer| s.line_width);
            self.draw_preview(painter, rect, view, preview, fill, Stroke::new(width, line));
        }
    }

    /// Returns the fill colors for `layer`, refreshing them on a new trigger.
    fn fills_for(&mut self, layer: &PointLayer) -> &[Color32] {
        let buffer = self
            .color_buffers
            .entry(layer.id.clone())
            .or_insert_with(|| ColorBuffer {
                trigger: layer.color_trigger,
                fills: Vec::new(),
            });
        if buffer.trigger != layer.color_trigger || buffer.fills.len() != layer.points.len() {
            log::debug!("Recoloring layer {}", layer.id);
            buffer.trigger = layer.color_trigger;
            buffer.fills = layer.points.iter().map(|p| p.fill).collect();
        }
        &buffer.fills
    }

    fn draw_points(&mut self, painter: &Painter, rect: Rect, view: &ViewState, layer: &PointLayer) {
        if !layer.visible {
            return;
        }
        let radius = self.point_radius;
        let fills = self.fills_for(layer);
        for (point, fill) in layer.points.iter().zip(fills) {
            let center = view.project(point.position, rect);
            if rect.expand(radius).contains(center) {
                painter.circle_filled(center, radius, *fill);
            }
        }
    }

    fn draw_features(
        &self,
        painter: &Painter,
        rect: Rect,
        view: &ViewState,
        layer: &EditableGeometryLayer,
    ) {
        let stroke = Stroke::new(2.0, layer.line);
        for feature in &layer.data.features {
            self.draw_feature(painter, rect, view, feature, layer.fill, stroke);
        }
    }

    fn draw_feature(
        &self,
        painter: &Painter,
        rect: Rect,
        view: &ViewState,
        feature: &Feature,
        fill: Color32,
        stroke: Stroke,
    ) {
        let project = |ps: &[Position]| -> Vec<Pos2> { ps.iter().map(|p| view.project(*p, rect)).collect() };
        match &feature.geometry {
            Geometry::Point(p) => {
                let center = view.project(*p, rect);
                painter.circle(center, 5.0, stroke.color, Stroke::new(1.5, Color32::WHITE));
            }
            Geometry::LineString(line) => {
                painter.add(Shape::line(project(line), stroke));
            }
            Geometry::Polygon(rings) => {
                for (i, ring) in rings.iter().enumerate() {
                    let points = project(ring);
                    if i == 0 && points.len() >= 3 {
                        painter.add(Shape::convex_polygon(points.clone(), fill, Stroke::NONE));
                    }
                    painter.add(Shape::closed_line(points, stroke));
                }
            }
        }
    }

    fn draw_preview(
        &self,
        painter: &Painter,
        rect: Rect,
        view: &ViewState,
        preview: &SketchPreview,
        fill: Color32,
        stroke: Stroke,
    ) {
        let project = |ps: &[Position]| -> Vec<Pos2> { ps.iter().map(|p| view.project(*p, rect)).collect() };
        let anchor = match &preview.shape {
            SketchShape::Path(path) => {
                let points = project(path);
                for p in &points {
                    painter.circle_filled(*p, 3.0, stroke.color);
                }
                let anchor = points.last().copied();
                painter.add(Shape::line(points, stroke));
                anchor
            }
            SketchShape::Ring(ring) => {
                let points = project(ring);
                if points.len() >= 3 {
                    painter.add(Shape::convex_polygon(points.clone(), fill, Stroke::NONE));
                }
                let anchor = points.last().copied();
                painter.add(Shape::closed_line(points, stroke));
                anchor
            }
        };

        if let (Some(label), Some(anchor)) = (&preview.label, anchor) {
            painter.text(
                anchor + egui::vec2(10.0, -10.0),
                Align2::LEFT_BOTTOM,
                label,
                FontId::proportional(14.0),
                Color32::WHITE,
            );
        }
    }

    /// Longitude/latitude lines so the map has a sense of place without tiles.
    fn draw_grid(&self, painter: &Painter, rect: Rect, view: &ViewState) {
        let top_left = view.unproject(rect.left_top(), rect);
        let bottom_right = view.unproject(rect.right_bottom(), rect);
        let degrees_per_px = (bottom_right[0] - top_left[0]) / f64::from(rect.width().max(1.0));
        let Some(step) = GRID_STEPS
            .iter()
            .rev()
            .copied()
            .find(|step| step / degrees_per_px >= f64::from(MIN_GRID_SPACING_PX))
        else {
            return;
        };

        let stroke = Stroke::new(1.0, self.grid);
        let mut lng = (top_left[0] / step).floor() * step;
        while lng <= bottom_right[0] {
            let x = view.project([lng, view.latitude], rect).x;
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            lng += step;
        }
        let mut lat = (bottom_right[1] / step).floor() * step;
        while lat <= top_left[1] {
            let y = view.project([view.longitude, lat], rect).y;
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
            lat += step;
        }
    }
}
