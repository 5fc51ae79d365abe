mod controller;
mod groups;

pub use controller::ToolModeController;
pub use groups::{MODE_GROUPS, ModeButtonConfig, ModeGroup};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeError;

/// How pointer input on the map is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    View,
    DrawPoint,
    DrawLine,
    DrawPolygon,
    DrawRectangle,
    DrawCircle,
    MeasureDistance,
    MeasureAngle,
    MeasureArea,
}

impl ToolMode {
    pub const ALL: [ToolMode; 9] = [
        ToolMode::View,
        ToolMode::DrawPoint,
        ToolMode::DrawLine,
        ToolMode::DrawPolygon,
        ToolMode::DrawRectangle,
        ToolMode::DrawCircle,
        ToolMode::MeasureDistance,
        ToolMode::MeasureAngle,
        ToolMode::MeasureArea,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::DrawPoint => "draw-point",
            Self::DrawLine => "draw-line",
            Self::DrawPolygon => "draw-polygon",
            Self::DrawRectangle => "draw-rectangle",
            Self::DrawCircle => "draw-circle",
            Self::MeasureDistance => "measure-distance",
            Self::MeasureAngle => "measure-angle",
            Self::MeasureArea => "measure-area",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::DrawPoint => "Draw point",
            Self::DrawLine => "Draw line",
            Self::DrawPolygon => "Draw polygon",
            Self::DrawRectangle => "Draw rectangle",
            Self::DrawCircle => "Draw circle",
            Self::MeasureDistance => "Measure distance",
            Self::MeasureAngle => "Measure angle",
            Self::MeasureArea => "Measure area",
        }
    }

    /// Whether this mode produces features in the edited geometry.
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            Self::DrawPoint | Self::DrawLine | Self::DrawPolygon | Self::DrawRectangle | Self::DrawCircle
        )
    }

    pub fn is_measuring(&self) -> bool {
        matches!(
            self,
            Self::MeasureDistance | Self::MeasureAngle | Self::MeasureArea
        )
    }

    /// Modes that honour a boolean operation in their config.
    pub fn supports_boolean_operation(&self) -> bool {
        matches!(self, Self::DrawPolygon | Self::DrawRectangle | Self::DrawCircle)
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ToolMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.token() == s)
            .ok_or_else(|| ModeError::UnknownToolMode(s.to_owned()))
    }
}

/// Marquee-style multi-point selection, independent of the tool mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    #[default]
    None,
    Rectangle,
    Polygon,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 3] = [
        SelectionMode::None,
        SelectionMode::Rectangle,
        SelectionMode::Polygon,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SelectionMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.token() == s)
            .ok_or_else(|| ModeError::UnknownSelectionMode(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOperation {
    Union,
    Difference,
    Intersection,
}

impl BooleanOperation {
    pub const ALL: [BooleanOperation; 3] = [
        BooleanOperation::Union,
        BooleanOperation::Difference,
        BooleanOperation::Intersection,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Union => "Union",
            Self::Difference => "Difference",
            Self::Intersection => "Intersection",
        }
    }
}

/// Mode-specific configuration. Reset to empty on every mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModeConfig {
    pub boolean_operation: Option<BooleanOperation>,
}

impl ModeConfig {
    pub fn with_boolean_operation(operation: BooleanOperation) -> Self {
        Self {
            boolean_operation: Some(operation),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boolean_operation.is_none()
    }
}
