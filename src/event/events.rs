use crate::geometry::{FeatureCollection, Position};

/// A dataset point under the pointer or inside a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedObject {
    pub layer_id: String,
    pub cluster: String,
    /// Index of the point inside its layer.
    pub index: usize,
    pub position: Position,
    pub text: String,
    /// Hover text, copied from the layer's render point.
    pub tooltip: String,
}

pub fn tooltip_text(text: &str, cluster: &str) -> String {
    if text.is_empty() {
        format!("Cluster {cluster}")
    } else {
        format!("{text} (Cluster {cluster})")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickingInfo {
    pub layer_id: String,
    pub index: usize,
    pub object: PickedObject,
}

/// Events the map surface emits upward.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Pointer hover; `None` when nothing is under the pointer.
    Pick { object: Option<PickedObject> },
    /// A completed edit carrying the complete new collection.
    Edit { updated_data: FeatureCollection },
    /// Points captured by the selection overlay.
    Select { picking_infos: Vec<PickingInfo> },
}
