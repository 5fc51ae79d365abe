use crate::geometry::FeatureCollection;
use crate::mode::{ModeConfig, SelectionMode, ToolMode};

/// Every state mutation the UI can request.
///
/// Panels and layers emit commands; only `MapState::execute` applies them,
/// each one to the single container that owns the data.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Flip a cluster in or out of the hidden set
    ToggleCluster(String),
    /// Switch tool and selection mode, clearing the mode config
    SetMode {
        mode: ToolMode,
        selection: SelectionMode,
    },
    /// Same as `SetMode`, from host-facing tokens such as `"draw-line"`.
    /// Unknown tokens leave the mode unchanged.
    SetModeByToken { mode: String, selection: String },
    SetModeConfig(ModeConfig),
    /// Replace the edited geometry with the collection from an edit
    ReplaceGeometry(FeatureCollection),
    ClearGeometry,
    /// Replace the edited geometry with an imported document
    ImportGeometry(FeatureCollection),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ToggleCluster(_) => "Toggle Cluster",
            Command::SetMode { .. } => "Set Mode",
            Command::SetModeByToken { .. } => "Set Mode By Token",
            Command::SetModeConfig(_) => "Set Mode Config",
            Command::ReplaceGeometry(_) => "Replace Geometry",
            Command::ClearGeometry => "Clear Geometry",
            Command::ImportGeometry(_) => "Import Geometry",
        }
    }
}
