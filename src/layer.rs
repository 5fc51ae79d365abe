use egui::Color32;

use crate::command::Command;
use crate::event::{EventHandler, MapEvent};
use crate::geometry::{FeatureCollection, Position};
use crate::mode::{ModeConfig, SelectionMode, ToolMode};

pub const EDITABLE_LAYER_ID: &str = "editable-geometry";
pub const SELECTION_LAYER_ID: &str = "selection";

/// Id of the point layer that renders `cluster`.
pub fn point_layer_id(cluster: &str) -> String {
    format!("cluster-{cluster}")
}

/// One dataset point, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPoint {
    pub position: Position,
    pub fill: Color32,
    pub text: String,
    /// Hover text: the point's text combined with its cluster name
    pub tooltip: String,
}

/// All points of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLayer {
    pub id: String,
    pub cluster: String,
    pub points: Vec<RenderPoint>,
    pub visible: bool,
    pub pickable: bool,
    /// Changes whenever the cluster colors were re-derived; a renderer holding
    /// per-layer color buffers must rebuild them when this differs.
    pub color_trigger: u64,
}

/// The user-drawn geometry, bound to the active tool.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableGeometryLayer {
    pub id: String,
    pub data: FeatureCollection,
    pub mode: ToolMode,
    pub config: ModeConfig,
    pub fill: Color32,
    pub line: Color32,
}

/// Marquee overlay for multi-point selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionLayer {
    pub id: String,
    pub selection: SelectionMode,
    /// Point layers whose points can be selected
    pub layer_ids: Vec<String>,
    pub tentative_fill: Color32,
    pub tentative_line: Color32,
    pub line_width: f32,
}

/// A renderable overlay handed to the map surface.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerDescriptor {
    Points(PointLayer),
    EditableGeometry(EditableGeometryLayer),
    Selection(SelectionLayer),
}

impl LayerDescriptor {
    pub fn id(&self) -> &str {
        match self {
            Self::Points(layer) => &layer.id,
            Self::EditableGeometry(layer) => &layer.id,
            Self::Selection(layer) => &layer.id,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Self::Points(layer) => layer.visible,
            Self::EditableGeometry(_) | Self::Selection(_) => true,
        }
    }

    pub fn as_points(&self) -> Option<&PointLayer> {
        match self {
            Self::Points(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_editable(&self) -> Option<&EditableGeometryLayer> {
        match self {
            Self::EditableGeometry(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&SelectionLayer> {
        match self {
            Self::Selection(layer) => Some(layer),
            _ => None,
        }
    }
}

impl EventHandler for EditableGeometryLayer {
    fn handle_event(&self, event: &MapEvent) -> Option<Command> {
        match event {
            MapEvent::Edit { updated_data } => Some(Command::ReplaceGeometry(updated_data.clone())),
            _ => None,
        }
    }
}

impl EventHandler for SelectionLayer {
    fn handle_event(&self, event: &MapEvent) -> Option<Command> {
        if let MapEvent::Select { picking_infos } = event {
            log::info!("Selected {} points", picking_infos.len());
            for info in picking_infos {
                log::debug!("  {} #{}: {}", info.layer_id, info.index, info.object.tooltip);
            }
        }
        None
    }
}

impl EventHandler for LayerDescriptor {
    fn handle_event(&self, event: &MapEvent) -> Option<Command> {
        match self {
            Self::Points(_) => None,
            Self::EditableGeometry(layer) => layer.handle_event(event),
            Self::Selection(layer) => layer.handle_event(event),
        }
    }
}

/// Ordered layer list: point layers first, then the editable geometry, then
/// the selection overlay, so that later layers draw on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerList {
    layers: Vec<LayerDescriptor>,
}

impl LayerList {
    pub fn new(layers: Vec<LayerDescriptor>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn point_layers(&self) -> impl Iterator<Item = &PointLayer> {
        self.layers.iter().filter_map(LayerDescriptor::as_points)
    }

    pub fn point_layer(&self, cluster: &str) -> Option<&PointLayer> {
        self.point_layers().find(|l| l.cluster == cluster)
    }

    pub fn editable(&self) -> Option<&EditableGeometryLayer> {
        self.layers.iter().find_map(LayerDescriptor::as_editable)
    }

    pub fn selection(&self) -> Option<&SelectionLayer> {
        self.layers.iter().find_map(LayerDescriptor::as_selection)
    }

    /// Runs `event` through every layer's handler, in layer order.
    pub fn dispatch(&self, event: &MapEvent) -> Vec<Command> {
        self.layers
            .iter()
            .filter_map(|layer| layer.handle_event(event))
            .collect()
    }
}
