use super::{MapTool, PointerInput, SketchPreview, SketchShape};
use crate::event::MapEvent;
use crate::geometry::measure::{
    angle_deg, circle_ring, format_distance, haversine_km, path_length_km, ring_area_km2,
};
use crate::geometry::{Feature, Geometry, Position};
use crate::layer::{EditableGeometryLayer, LayerList};
use crate::mode::ToolMode;

const CIRCLE_STEPS: usize = 64;

/// Turns pointer input into drawn features and live measurements.
///
/// Every completed shape is reported as a [`MapEvent::Edit`] holding the
/// layer's current collection plus the new feature.
#[derive(Debug, Default)]
pub struct GeometryEditor {
    /// Mode the sketch was started in; a mode switch drops the sketch
    mode: ToolMode,
    vertices: Vec<Position>,
    drag_anchor: Option<Position>,
    cursor: Option<Position>,
}

impl GeometryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    fn sync_mode(&mut self, mode: ToolMode) {
        if self.mode != mode {
            self.reset();
            self.mode = mode;
        }
    }

    fn push_vertex(&mut self, position: Position) {
        if self.mode == ToolMode::MeasureAngle && self.vertices.len() >= 3 {
            self.vertices.clear();
        }
        if self.vertices.last() != Some(&position) {
            self.vertices.push(position);
        }
    }

    fn finish(&mut self, layer: &EditableGeometryLayer) -> Option<MapEvent> {
        let vertices = std::mem::take(&mut self.vertices);
        let geometry = match self.mode {
            ToolMode::DrawLine if vertices.len() >= 2 => Geometry::LineString(vertices),
            ToolMode::DrawPolygon if vertices.len() >= 3 => Geometry::polygon(vertices),
            ToolMode::DrawLine | ToolMode::DrawPolygon => {
                log::debug!("Discarding sketch with {} vertices", vertices.len());
                return None;
            }
            _ => return None,
        };
        Some(self.emit(layer, geometry, self.mode))
    }

    fn finish_drag(&mut self, end: Position, layer: &EditableGeometryLayer) -> Option<MapEvent> {
        let start = self.drag_anchor.take()?;
        if start == end {
            return None;
        }
        let geometry = match self.mode {
            ToolMode::DrawRectangle => Geometry::polygon(vec![
                start,
                [end[0], start[1]],
                end,
                [start[0], end[1]],
            ]),
            ToolMode::DrawCircle => {
                let radius = haversine_km(start, end);
                Geometry::Polygon(vec![circle_ring(start, radius, CIRCLE_STEPS)])
            }
            _ => return None,
        };
        Some(self.emit(layer, geometry, self.mode))
    }

    fn emit(&self, layer: &EditableGeometryLayer, geometry: Geometry, mode: ToolMode) -> MapEvent {
        let shape = match mode {
            ToolMode::DrawRectangle => "Rectangle",
            ToolMode::DrawCircle => "Circle",
            _ => geometry.kind(),
        };
        let mut feature = Feature::new(geometry).with_property("shape", shape);
        if let Some(operation) = layer.config.boolean_operation {
            if mode.supports_boolean_operation() {
                feature = feature.with_property("booleanOperation", operation.label().to_lowercase());
            }
        }
        log::info!("Drew {} feature {}", shape, feature.id);
        MapEvent::Edit {
            updated_data: layer.data.with_feature(feature),
        }
    }

    /// Vertices of the sketch including the rubber-band vertex under the cursor.
    fn live_vertices(&self) -> Vec<Position> {
        let mut vertices = self.vertices.clone();
        if let Some(cursor) = self.cursor {
            if !vertices.is_empty() && vertices.last() != Some(&cursor) {
                vertices.push(cursor);
            }
        }
        vertices
    }

    /// Live measurement text for the measure modes.
    pub fn measurement(&self) -> Option<String> {
        let vertices = self.live_vertices();
        match self.mode {
            ToolMode::MeasureDistance if vertices.len() >= 2 => {
                Some(format_distance(path_length_km(&vertices)))
            }
            ToolMode::MeasureAngle if vertices.len() >= 3 => {
                Some(format!("{:.1}°", angle_deg(vertices[0], vertices[1], vertices[2])))
            }
            ToolMode::MeasureArea if vertices.len() >= 3 => {
                Some(format!("{:.3} km²", ring_area_km2(&vertices)))
            }
            _ => None,
        }
    }
}

impl MapTool for GeometryEditor {
    fn name(&self) -> &'static str {
        "GeometryEditor"
    }

    fn on_input(&mut self, input: PointerInput, layers: &LayerList) -> Option<MapEvent> {
        let layer = layers.editable()?;
        self.sync_mode(layer.mode);

        match input {
            PointerInput::Hover(position) | PointerInput::Drag(position) => {
                self.cursor = Some(position);
                None
            }
            PointerInput::Click(position) => match self.mode {
                ToolMode::DrawPoint => Some(self.emit(layer, Geometry::Point(position), self.mode)),
                ToolMode::DrawLine | ToolMode::DrawPolygon => {
                    self.push_vertex(position);
                    None
                }
                mode if mode.is_measuring() => {
                    self.push_vertex(position);
                    None
                }
                _ => None,
            },
            PointerInput::DoubleClick(position) => {
                if self.mode.is_measuring() {
                    self.reset();
                    return None;
                }
                self.push_vertex(position);
                self.finish(layer)
            }
            PointerInput::Finish => {
                if self.mode.is_measuring() {
                    self.reset();
                    return None;
                }
                self.finish(layer)
            }
            PointerInput::DragStart(position) => {
                if matches!(self.mode, ToolMode::DrawRectangle | ToolMode::DrawCircle) {
                    self.drag_anchor = Some(position);
                    self.cursor = Some(position);
                }
                None
            }
            PointerInput::DragEnd(position) => self.finish_drag(position, layer),
            PointerInput::Cancel => {
                self.reset();
                None
            }
        }
    }

    fn preview(&self) -> Option<SketchPreview> {
        if let (Some(start), Some(end)) = (self.drag_anchor, self.cursor) {
            let ring = match self.mode {
                ToolMode::DrawRectangle => {
                    vec![start, [end[0], start[1]], end, [start[0], end[1]], start]
                }
                ToolMode::DrawCircle => circle_ring(start, haversine_km(start, end), CIRCLE_STEPS),
                _ => return None,
            };
            return Some(SketchPreview {
                shape: SketchShape::Ring(ring),
                label: None,
            });
        }

        let vertices = self.live_vertices();
        if vertices.is_empty() {
            return None;
        }
        let shape = match self.mode {
            ToolMode::DrawPolygon | ToolMode::MeasureArea => SketchShape::Ring(vertices),
            _ => SketchShape::Path(vertices),
        };
        Some(SketchPreview {
            shape,
            label: self.measurement(),
        })
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.drag_anchor = None;
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FeatureCollection;
    use crate::layer::{EDITABLE_LAYER_ID, LayerDescriptor};
    use crate::mode::{BooleanOperation, ModeConfig};
    use egui::Color32;

    fn layers(mode: ToolMode, data: FeatureCollection, config: ModeConfig) -> LayerList {
        LayerList::new(vec![LayerDescriptor::EditableGeometry(EditableGeometryLayer {
            id: EDITABLE_LAYER_ID.to_owned(),
            data,
            mode,
            config,
            fill: Color32::TRANSPARENT,
            line: Color32::BLACK,
        })])
    }

    fn edited(event: Option<MapEvent>) -> FeatureCollection {
        match event {
            Some(MapEvent::Edit { updated_data }) => updated_data,
            other => panic!("expected an edit, got {other:?}"),
        }
    }

    #[test]
    fn test_draw_point_appends_to_existing() {
        let existing = FeatureCollection::new().with_feature(Feature::new(Geometry::Point([0.0, 0.0])));
        let layers = layers(ToolMode::DrawPoint, existing.clone(), ModeConfig::default());
        let mut editor = GeometryEditor::new();

        let updated = edited(editor.on_input(PointerInput::Click([1.0, 1.0]), &layers));
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.features[0], existing.features[0]);
        assert_eq!(updated.features[1].geometry, Geometry::Point([1.0, 1.0]));
    }

    #[test]
    fn test_polygon_finishes_on_double_click() {
        let layers = layers(ToolMode::DrawPolygon, FeatureCollection::new(), ModeConfig::default());
        let mut editor = GeometryEditor::new();
        assert!(editor.on_input(PointerInput::Click([0.0, 0.0]), &layers).is_none());
        assert!(editor.on_input(PointerInput::Click([1.0, 0.0]), &layers).is_none());
        let updated = edited(editor.on_input(PointerInput::DoubleClick([1.0, 1.0]), &layers));
        let ring = updated.features[0].geometry.outer_ring().unwrap();
        assert_eq!(ring.len(), 4);
        assert!(editor.preview().is_none());
    }

    #[test]
    fn test_short_line_is_discarded() {
        let layers = layers(ToolMode::DrawLine, FeatureCollection::new(), ModeConfig::default());
        let mut editor = GeometryEditor::new();
        editor.on_input(PointerInput::Click([0.0, 0.0]), &layers);
        assert!(editor.on_input(PointerInput::Finish, &layers).is_none());
    }

    #[test]
    fn test_rectangle_from_drag_records_config() {
        let config = ModeConfig::with_boolean_operation(BooleanOperation::Difference);
        let layers = layers(ToolMode::DrawRectangle, FeatureCollection::new(), config);
        let mut editor = GeometryEditor::new();
        editor.on_input(PointerInput::DragStart([0.0, 0.0]), &layers);
        editor.on_input(PointerInput::Drag([1.0, 1.0]), &layers);
        assert!(matches!(
            editor.preview().map(|p| p.shape),
            Some(SketchShape::Ring(ring)) if ring.len() == 5
        ));

        let updated = edited(editor.on_input(PointerInput::DragEnd([2.0, 1.0]), &layers));
        let feature = &updated.features[0];
        assert_eq!(feature.properties["shape"], "Rectangle");
        assert_eq!(feature.properties["booleanOperation"], "difference");
        assert_eq!(feature.geometry.outer_ring().unwrap().len(), 5);
    }

    #[test]
    fn test_circle_from_drag() {
        let layers = layers(ToolMode::DrawCircle, FeatureCollection::new(), ModeConfig::default());
        let mut editor = GeometryEditor::new();
        editor.on_input(PointerInput::DragStart([-74.0, 40.7]), &layers);
        let updated = edited(editor.on_input(PointerInput::DragEnd([-73.99, 40.7]), &layers));
        assert_eq!(
            updated.features[0].geometry.outer_ring().unwrap().len(),
            CIRCLE_STEPS + 1
        );
    }

    #[test]
    fn test_measure_distance_never_edits() {
        let layers = layers(ToolMode::MeasureDistance, FeatureCollection::new(), ModeConfig::default());
        let mut editor = GeometryEditor::new();
        assert!(editor.on_input(PointerInput::Click([0.0, 0.0]), &layers).is_none());
        assert!(editor.on_input(PointerInput::Click([1.0, 0.0]), &layers).is_none());
        assert_eq!(editor.measurement().as_deref(), Some("111.20 km"));
        assert!(editor.on_input(PointerInput::DoubleClick([1.0, 0.0]), &layers).is_none());
        assert!(editor.measurement().is_none());
    }

    #[test]
    fn test_measure_angle_restarts_after_three_vertices() {
        let layers = layers(ToolMode::MeasureAngle, FeatureCollection::new(), ModeConfig::default());
        let mut editor = GeometryEditor::new();
        for p in [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0]] {
            editor.on_input(PointerInput::Click(p), &layers);
        }
        assert_eq!(editor.measurement().as_deref(), Some("90.0°"));
        editor.on_input(PointerInput::Click([5.0, 5.0]), &layers);
        assert!(editor.measurement().is_none());
    }

    #[test]
    fn test_mode_switch_drops_sketch() {
        let mut editor = GeometryEditor::new();
        let polygon = layers(ToolMode::DrawPolygon, FeatureCollection::new(), ModeConfig::default());
        editor.on_input(PointerInput::Click([0.0, 0.0]), &polygon);
        editor.on_input(PointerInput::Click([1.0, 0.0]), &polygon);

        let line = layers(ToolMode::DrawLine, FeatureCollection::new(), ModeConfig::default());
        editor.on_input(PointerInput::Click([5.0, 5.0]), &line);
        assert!(editor.on_input(PointerInput::Finish, &line).is_none());
    }

    #[test]
    fn test_escape_cancels() {
        let layers = layers(ToolMode::DrawPolygon, FeatureCollection::new(), ModeConfig::default());
        let mut editor = GeometryEditor::new();
        editor.on_input(PointerInput::Click([0.0, 0.0]), &layers);
        editor.on_input(PointerInput::Cancel, &layers);
        assert!(editor.preview().is_none());
    }
}
