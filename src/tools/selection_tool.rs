use super::{MapTool, PointerInput, SketchPreview, SketchShape};
use crate::event::{MapEvent, PickedObject, PickingInfo};
use crate::geometry::Position;
use crate::geometry::hit_testing::{point_in_box, point_in_ring};
use crate::layer::{LayerList, SelectionLayer};
use crate::mode::SelectionMode;

/// Marquee selection over the selectable point layers.
#[derive(Debug, Default)]
pub struct SelectionTool {
    selection: SelectionMode,
    drag_anchor: Option<Position>,
    ring: Vec<Position>,
    cursor: Option<Position>,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn sync_selection(&mut self, selection: SelectionMode) {
        if self.selection != selection {
            self.reset();
            self.selection = selection;
        }
    }

    /// Every visible, pickable point of the target layers accepted by `inside`.
    fn collect(
        layer: &SelectionLayer,
        layers: &LayerList,
        inside: impl Fn(Position) -> bool,
    ) -> Vec<PickingInfo> {
        let inside = &inside;
        layers
            .point_layers()
            .filter(|l| l.visible && l.pickable && layer.layer_ids.contains(&l.id))
            .flat_map(move |l| {
                l.points
                    .iter()
                    .enumerate()
                    .filter(move |(_, p)| inside(p.position))
                    .map(move |(index, p)| PickingInfo {
                        layer_id: l.id.clone(),
                        index,
                        object: PickedObject {
                            layer_id: l.id.clone(),
                            cluster: l.cluster.clone(),
                            index,
                            position: p.position,
                            text: p.text.clone(),
                            tooltip: p.tooltip.clone(),
                        },
                    })
            })
            .collect()
    }

    fn close_ring(&mut self, layer: &SelectionLayer, layers: &LayerList) -> Option<MapEvent> {
        let ring = std::mem::take(&mut self.ring);
        if ring.len() < 3 {
            return None;
        }
        let picking_infos = Self::collect(layer, layers, |p| point_in_ring(p, &ring));
        Some(MapEvent::Select { picking_infos })
    }
}

impl MapTool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn on_input(&mut self, input: PointerInput, layers: &LayerList) -> Option<MapEvent> {
        let layer = layers.selection()?;
        self.sync_selection(layer.selection);

        match (self.selection, input) {
            (SelectionMode::None, _) => None,
            (_, PointerInput::Hover(p)) | (_, PointerInput::Drag(p)) => {
                self.cursor = Some(p);
                None
            }
            (SelectionMode::Rectangle, PointerInput::DragStart(p)) => {
                self.drag_anchor = Some(p);
                self.cursor = Some(p);
                None
            }
            (SelectionMode::Rectangle, PointerInput::DragEnd(end)) => {
                let start = self.drag_anchor.take()?;
                let picking_infos = Self::collect(layer, layers, |p| point_in_box(p, start, end));
                Some(MapEvent::Select { picking_infos })
            }
            (SelectionMode::Polygon, PointerInput::Click(p)) => {
                if self.ring.last() != Some(&p) {
                    self.ring.push(p);
                }
                None
            }
            (SelectionMode::Polygon, PointerInput::DoubleClick(p)) => {
                if self.ring.last() != Some(&p) {
                    self.ring.push(p);
                }
                self.close_ring(layer, layers)
            }
            (SelectionMode::Polygon, PointerInput::Finish) => self.close_ring(layer, layers),
            (_, PointerInput::Cancel) => {
                self.reset();
                None
            }
            _ => None,
        }
    }

    fn preview(&self) -> Option<SketchPreview> {
        match self.selection {
            SelectionMode::None => None,
            SelectionMode::Rectangle => {
                let (start, end) = (self.drag_anchor?, self.cursor?);
                Some(SketchPreview {
                    shape: SketchShape::Ring(vec![
                        start,
                        [end[0], start[1]],
                        end,
                        [start[0], end[1]],
                        start,
                    ]),
                    label: None,
                })
            }
            SelectionMode::Polygon => {
                if self.ring.is_empty() {
                    return None;
                }
                let mut ring = self.ring.clone();
                ring.extend(self.cursor);
                Some(SketchPreview {
                    shape: SketchShape::Ring(ring),
                    label: None,
                })
            }
        }
    }

    fn reset(&mut self) {
        self.drag_anchor = None;
        self.ring.clear();
        self.cursor = None;
    }
}
