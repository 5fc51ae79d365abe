use super::{SelectionMode, ToolMode};

/// One toolbox button: the modes it switches to and its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeButtonConfig {
    pub mode: ToolMode,
    pub selection: SelectionMode,
    pub icon: &'static str,
    pub tooltip: &'static str,
}

/// Buttons that share one slot in the toolbox and expand into sub tools.
#[derive(Debug, Clone, Copy)]
pub struct ModeGroup {
    pub modes: &'static [ModeButtonConfig],
}

impl ModeGroup {
    /// The member matching the live state, or the first one.
    pub fn current(&self, mode: ToolMode, selection: SelectionMode) -> &ModeButtonConfig {
        self.modes
            .iter()
            .find(|b| b.mode == mode && b.selection == selection)
            .or_else(|| self.modes.iter().find(|b| b.mode == mode))
            .unwrap_or(&self.modes[0])
    }

    pub fn is_expandable(&self) -> bool {
        self.modes.len() > 1
    }
}

const fn button(
    mode: ToolMode,
    selection: SelectionMode,
    icon: &'static str,
    tooltip: &'static str,
) -> ModeButtonConfig {
    ModeButtonConfig {
        mode,
        selection,
        icon,
        tooltip,
    }
}

pub const MODE_GROUPS: &[ModeGroup] = &[
    ModeGroup {
        modes: &[button(ToolMode::View, SelectionMode::None, "⬉", "View")],
    },
    ModeGroup {
        modes: &[button(ToolMode::DrawPoint, SelectionMode::None, "•", "Draw point")],
    },
    ModeGroup {
        modes: &[button(ToolMode::DrawLine, SelectionMode::None, "⟋", "Draw line")],
    },
    ModeGroup {
        modes: &[
            button(ToolMode::View, SelectionMode::Polygon, "⬠", "Select with polygon"),
            button(ToolMode::View, SelectionMode::Rectangle, "⬚", "Select with rectangle"),
        ],
    },
    ModeGroup {
        modes: &[
            button(ToolMode::DrawPolygon, SelectionMode::None, "⬟", "Draw polygon"),
            button(ToolMode::DrawRectangle, SelectionMode::None, "▭", "Draw rectangle"),
            button(ToolMode::DrawCircle, SelectionMode::None, "◯", "Draw circle"),
        ],
    },
    ModeGroup {
        modes: &[
            button(ToolMode::MeasureDistance, SelectionMode::None, "📏", "Measure distance"),
            button(ToolMode::MeasureAngle, SelectionMode::None, "∠", "Measure angle"),
            button(ToolMode::MeasureArea, SelectionMode::None, "▦", "Measure area"),
        ],
    },
];
