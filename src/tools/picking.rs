use egui::{Pos2, Rect};

use crate::event::PickedObject;
use crate::layer::LayerList;
use crate::view::ViewState;

/// The visible point closest to `pointer`, within `radius` screen pixels.
///
/// Later layers draw on top, so on a tie the later layer wins.
pub fn pick_nearest(
    layers: &LayerList,
    view: &ViewState,
    rect: Rect,
    pointer: Pos2,
    radius: f32,
) -> Option<PickedObject> {
    let mut best: Option<(f32, PickedObject)> = None;
    for layer in layers.point_layers().filter(|l| l.visible && l.pickable) {
        for (index, point) in layer.points.iter().enumerate() {
            let distance = view.project(point.position, rect).distance(pointer);
            if distance > radius {
                continue;
            }
            if best.as_ref().is_some_and(|(d, _)| distance > *d) {
                continue;
            }
            best = Some((
                distance,
                PickedObject {
                    layer_id: layer.id.clone(),
                    cluster: layer.cluster.clone(),
                    index,
                    position: point.position,
                    text: point.text.clone(),
                    tooltip: point.tooltip.clone(),
                },
            ));
        }
    }
    best.map(|(_, object)| object)
}
