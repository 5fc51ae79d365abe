use super::{ModeConfig, SelectionMode, ToolMode};

/// Owns the active tool mode, its configuration and the selection mode.
///
/// Every transition is legal; any mode can be entered from any other
/// mode directly. Switching modes always clears the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolModeController {
    mode: ToolMode,
    selection: SelectionMode,
    config: ModeConfig,
}

impl Default for ToolModeController {
    fn default() -> Self {
        // The map opens ready to draw polygons.
        Self::new(ToolMode::DrawPolygon, SelectionMode::None)
    }
}

impl ToolModeController {
    pub fn new(mode: ToolMode, selection: SelectionMode) -> Self {
        Self {
            mode,
            selection,
            config: ModeConfig::default(),
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn selection(&self) -> SelectionMode {
        self.selection
    }

    pub fn config(&self) -> ModeConfig {
        self.config
    }

    pub fn set_mode(&mut self, mode: ToolMode, selection: SelectionMode) {
        log::debug!(
            "Mode {}/{} -> {}/{}",
            self.mode,
            self.selection,
            mode,
            selection
        );
        self.mode = mode;
        self.selection = selection;
        self.config = ModeConfig::default();
    }

    /// Parses both tokens first; on any unknown token nothing changes.
    /// Returns whether the transition was applied.
    pub fn set_mode_by_token(&mut self, mode: &str, selection: &str) -> bool {
        match (mode.parse::<ToolMode>(), selection.parse::<SelectionMode>()) {
            (Ok(mode), Ok(selection)) => {
                self.set_mode(mode, selection);
                true
            }
            (Err(err), _) | (_, Err(err)) => {
                log::warn!("Rejected mode change: {}", err);
                false
            }
        }
    }

    pub fn set_config(&mut self, config: ModeConfig) {
        self.config = config;
    }

    /// True when the given button configuration matches the live state.
    pub fn is_active(&self, mode: ToolMode, selection: SelectionMode) -> bool {
        self.mode == mode && self.selection == selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::BooleanOperation;

    #[test]
    fn test_mode_switch_resets_config() {
        let mut controller = ToolModeController::default();
        controller.set_config(ModeConfig::with_boolean_operation(BooleanOperation::Union));
        assert!(!controller.config().is_empty());

        controller.set_mode(ToolMode::DrawRectangle, SelectionMode::None);
        assert!(controller.config().is_empty());
    }

    #[test]
    fn test_same_mode_still_resets_config() {
        let mut controller = ToolModeController::default();
        controller.set_config(ModeConfig::with_boolean_operation(BooleanOperation::Difference));
        controller.set_mode(controller.mode(), controller.selection());
        assert!(controller.config().is_empty());
    }

    #[test]
    fn test_every_transition_is_direct() {
        for from in ToolMode::ALL {
            for to in ToolMode::ALL {
                for selection in SelectionMode::ALL {
                    let mut controller = ToolModeController::new(from, SelectionMode::None);
                    controller.set_mode(to, selection);
                    assert!(controller.is_active(to, selection));
                }
            }
        }
    }

    #[test]
    fn test_unknown_token_keeps_prior_mode() {
        let mut controller = ToolModeController::new(ToolMode::MeasureArea, SelectionMode::Rectangle);
        controller.set_config(ModeConfig::with_boolean_operation(BooleanOperation::Intersection));

        assert!(!controller.set_mode_by_token("teleport", "none"));
        assert!(!controller.set_mode_by_token("view", "lasso"));
        assert!(controller.is_active(ToolMode::MeasureArea, SelectionMode::Rectangle));
        assert!(!controller.config().is_empty());

        assert!(controller.set_mode_by_token("view", "polygon"));
        assert!(controller.is_active(ToolMode::View, SelectionMode::Polygon));
    }
}
