use cluster_map::dataset::parse_series;
use cluster_map::event::MapEvent;
use cluster_map::geometry::{Feature, FeatureCollection, Geometry};
use cluster_map::mode::BooleanOperation;
use cluster_map::{Command, MapState, ModeConfig, SelectionMode, ToolMode, ToolModeController};

fn loaded() -> MapState {
    let series = parse_series(
        r##"[{"name":"X","text":["p1"],"x":[1],"y":[2],"marker":{"color":["#ff0000"]}}]"##,
    )
    .unwrap();
    let mut state = MapState::new();
    state.load_dataset(&series);
    state
}

fn one_point() -> FeatureCollection {
    FeatureCollection::new().with_feature(Feature::new(Geometry::Point([1.0, 2.0])))
}

#[test]
fn test_double_toggle_restores_the_hidden_set() {
    let mut state = loaded();
    let before = state.visibility().clone();
    state.execute(Command::ToggleCluster("X".into()));
    assert!(state.visibility().is_hidden("X"));
    state.execute(Command::ToggleCluster("X".into()));
    assert_eq!(state.visibility(), &before);
}

#[test]
fn test_mode_switch_resets_config() {
    let mut state = loaded();
    state.execute(Command::SetModeConfig(ModeConfig::with_boolean_operation(
        BooleanOperation::Difference,
    )));
    assert!(!state.tool().config().is_empty());

    for mode in ToolMode::ALL {
        state.execute(Command::SetModeConfig(ModeConfig::with_boolean_operation(
            BooleanOperation::Union,
        )));
        state.execute(Command::SetMode {
            mode,
            selection: SelectionMode::None,
        });
        assert!(state.tool().config().is_empty(), "{mode}");
        assert_eq!(state.tool().mode(), mode);
    }
}

#[test]
fn test_every_mode_reachable_from_every_mode() {
    let mut controller = ToolModeController::default();
    for from in ToolMode::ALL {
        for to in ToolMode::ALL {
            for selection in SelectionMode::ALL {
                controller.set_mode(from, SelectionMode::None);
                controller.set_mode(to, selection);
                assert!(controller.is_active(to, selection));
            }
        }
    }
}

#[test]
fn test_unknown_mode_token_keeps_prior_mode() {
    let mut controller = ToolModeController::new(ToolMode::MeasureArea, SelectionMode::Polygon);
    assert!(!controller.set_mode_by_token("draw-hexagon", "none"));
    assert!(!controller.set_mode_by_token("view", "lasso"));
    assert!(controller.is_active(ToolMode::MeasureArea, SelectionMode::Polygon));

    assert!(controller.set_mode_by_token("draw-line", "rectangle"));
    assert!(controller.is_active(ToolMode::DrawLine, SelectionMode::Rectangle));
}

#[test]
fn test_edit_event_replaces_whole_collection() {
    let mut state = loaded();
    state.execute(Command::ImportGeometry(one_point()));

    let replacement = FeatureCollection::new()
        .with_feature(Feature::new(Geometry::LineString(vec![[0.0, 0.0], [1.0, 1.0]])));
    state.handle_event(&MapEvent::Edit {
        updated_data: replacement.clone(),
    });
    assert_eq!(state.geometry(), &replacement);

    let layers = state.layers().unwrap();
    assert_eq!(layers.editable().unwrap().data, replacement);
}

#[test]
fn test_clear_empties_geometry() {
    let mut state = loaded();
    state.execute(Command::ReplaceGeometry(one_point()));
    assert_eq!(state.geometry().len(), 1);
    state.execute(Command::ClearGeometry);
    assert!(state.geometry().is_empty());
}

#[test]
fn test_select_event_changes_nothing() {
    let mut state = loaded();
    let before = state.dependencies();
    state.handle_event(&MapEvent::Select {
        picking_infos: Vec::new(),
    });
    state.handle_event(&MapEvent::Pick { object: None });
    assert_eq!(state.dependencies(), before);
}

#[test]
fn test_editable_layer_follows_mode_and_config() {
    let mut state = loaded();
    state.execute(Command::SetMode {
        mode: ToolMode::DrawRectangle,
        selection: SelectionMode::None,
    });
    state.execute(Command::SetModeConfig(ModeConfig::with_boolean_operation(
        BooleanOperation::Intersection,
    )));

    let layers = state.layers().unwrap();
    let editable = layers.editable().unwrap();
    assert_eq!(editable.mode, ToolMode::DrawRectangle);
    assert_eq!(
        editable.config.boolean_operation,
        Some(BooleanOperation::Intersection)
    );
}

#[test]
fn test_mode_by_token_applies_known_tokens_only() {
    let mut state = loaded();
    let before = state.dependencies();
    assert!(state.execute(Command::SetModeByToken {
        mode: "draw-line".into(),
        selection: "rectangle".into(),
    }));
    assert!(state.tool().is_active(ToolMode::DrawLine, SelectionMode::Rectangle));
    assert_ne!(state.dependencies(), before);

    let before = state.dependencies();
    assert!(!state.execute(Command::SetModeByToken {
        mode: "draw-line".into(),
        selection: "lasso".into(),
    }));
    assert!(state.tool().is_active(ToolMode::DrawLine, SelectionMode::Rectangle));
    assert_eq!(state.dependencies(), before);
}
