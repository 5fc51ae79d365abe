//! Derives the layer list from the four state containers.
//!
//! [`compose`] is a pure function; [`LayerDependencies`] is the declared set of
//! inputs whose change makes a recomposition necessary.

use std::collections::HashMap;

use egui::Color32;

use crate::cluster::ClusterRegistry;
use crate::color::hex_to_rgb;
use crate::dataset::Dataset;
use crate::event::tooltip_text;
use crate::geometry::FeatureCollection;
use crate::layer::{
    EDITABLE_LAYER_ID, EditableGeometryLayer, LayerDescriptor, LayerList, PointLayer, RenderPoint,
    SELECTION_LAYER_ID, SelectionLayer, point_layer_id,
};
use crate::mode::ToolModeController;
use crate::visibility::VisibilityToggleSet;

/// Revision of every input the composer reads. Any bump means recompose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LayerDependencies {
    /// Dataset and the cluster registry derived from it
    pub dataset: u64,
    pub visibility: u64,
    /// Tool mode, its config and the selection mode
    pub tool_mode: u64,
    pub geometry: u64,
}

/// Read-only snapshot of the composer's inputs.
#[derive(Debug, Clone, Copy)]
pub struct ComposerInputs<'a> {
    pub dataset: Option<&'a Dataset>,
    pub registry: &'a ClusterRegistry,
    pub visibility: &'a VisibilityToggleSet,
    pub tool: &'a ToolModeController,
    pub geometry: &'a FeatureCollection,
    /// Forces color refresh whenever the registry is re-derived
    pub color_trigger: u64,
}

/// Builds the full layer list, or `None` while the dataset is absent.
pub fn compose(inputs: &ComposerInputs<'_>) -> Option<LayerList> {
    let dataset = inputs.dataset?;

    let mut by_cluster: HashMap<&str, Vec<RenderPoint>> = inputs
        .registry
        .names()
        .map(|name| (name, Vec::new()))
        .collect();
    for record in dataset.points() {
        if let Some(points) = by_cluster.get_mut(record.cluster.as_str()) {
            points.push(RenderPoint {
                position: record.position(),
                fill: hex_to_rgb(&record.color),
                text: record.text.clone(),
                tooltip: tooltip_text(&record.text, &record.cluster),
            });
        }
    }

    let mut layers: Vec<LayerDescriptor> = inputs
        .registry
        .names()
        .map(|name| {
            LayerDescriptor::Points(PointLayer {
                id: point_layer_id(name),
                cluster: name.to_owned(),
                points: by_cluster.remove(name).unwrap_or_default(),
                visible: !inputs.visibility.is_hidden(name),
                pickable: true,
                color_trigger: inputs.color_trigger,
            })
        })
        .collect();

    let point_layer_ids = layers.iter().map(|l| l.id().to_owned()).collect();

    layers.push(LayerDescriptor::EditableGeometry(EditableGeometryLayer {
        id: EDITABLE_LAYER_ID.to_owned(),
        data: inputs.geometry.clone(),
        mode: inputs.tool.mode(),
        config: inputs.tool.config(),
        fill: Color32::from_rgba_unmultiplied(0, 105, 217, 60),
        line: Color32::from_rgb(0, 105, 217),
    }));

    layers.push(LayerDescriptor::Selection(SelectionLayer {
        id: SELECTION_LAYER_ID.to_owned(),
        selection: inputs.tool.selection(),
        layer_ids: point_layer_ids,
        tentative_fill: Color32::from_rgba_unmultiplied(255, 0, 255, 100),
        tentative_line: Color32::from_rgb(0, 0, 255),
        line_width: 3.0,
    }));

    Some(LayerList::new(layers))
}
