use cluster_map::color::FALLBACK_COLOR;
use cluster_map::dataset::parse_series;
use cluster_map::{Command, LayerList, MapState};
use egui::Color32;

fn loaded(body: &str) -> MapState {
    let series = parse_series(body).unwrap();
    let mut state = MapState::new();
    assert!(state.load_dataset(&series));
    state
}

fn snapshot(state: &mut MapState) -> LayerList {
    state.layers().cloned().expect("dataset is loaded")
}

const THREE_CLUSTERS: &str = r##"[
    {"name":"A","mode":"markers","text":["a1","a2"],"x":[1,2],"y":[1,2],"marker":{"color":["#ff0000","#ff0000"]}},
    {"name":"B","mode":"markers","text":["b1"],"x":[3],"y":[3],"marker":{"color":["#00ff00"]}},
    {"name":"C","mode":"markers","text":["c1"],"x":[4],"y":[4],"marker":{"color":["#0000ff"]}}
]"##;

#[test]
fn test_end_to_end_toggle_scenario() {
    let mut state = loaded(
        r##"[{"name":"X","text":["p1"],"x":[1],"y":[2],"marker":{"color":["#ff0000"]}}]"##,
    );

    let clusters = state.registry().clusters().to_vec();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].name, "X");
    assert_eq!(clusters[0].color, "#ff0000");

    let layers = snapshot(&mut state);
    assert_eq!(layers.point_layers().count(), 1);
    let layer = layers.point_layer("X").unwrap();
    assert_eq!(layer.points.len(), 1);
    assert_eq!(layer.points[0].position, [1.0, 2.0]);
    assert_eq!(layer.points[0].fill, Color32::from_rgb(255, 0, 0));
    assert_eq!(layer.points[0].tooltip, "p1 (Cluster X)");
    assert!(layer.visible);

    assert!(state.execute(Command::ToggleCluster("X".into())));
    let layers = snapshot(&mut state);
    assert!(!layers.point_layer("X").unwrap().visible);
}

#[test]
fn test_composition_is_deterministic() {
    let mut state = loaded(THREE_CLUSTERS);
    state.execute(Command::ToggleCluster("B".into()));

    let first = snapshot(&mut state);
    let second = cluster_map::compose(&state.inputs()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_hidden_set_matches_layer_visibility() {
    let mut state = loaded(THREE_CLUSTERS);
    state.execute(Command::ToggleCluster("A".into()));
    state.execute(Command::ToggleCluster("C".into()));

    let layers = snapshot(&mut state);
    for layer in layers.point_layers() {
        assert_eq!(
            state.visibility().is_hidden(&layer.cluster),
            !layer.visible,
            "cluster {}",
            layer.cluster
        );
    }
}

#[test]
fn test_layer_order_points_then_editable_then_selection() {
    let mut state = loaded(THREE_CLUSTERS);
    let layers = snapshot(&mut state);
    let ids: Vec<&str> = layers.layers().iter().map(|l| l.id()).collect();
    assert_eq!(
        ids,
        ["cluster-A", "cluster-B", "cluster-C", "editable-geometry", "selection"]
    );
    assert_eq!(
        layers.selection().unwrap().layer_ids,
        ["cluster-A", "cluster-B", "cluster-C"]
    );
}

#[test]
fn test_empty_dataset_has_only_edit_and_selection_layers() {
    let mut state = loaded("[]");
    let layers = snapshot(&mut state);
    assert_eq!(layers.len(), 2);
    assert_eq!(layers.point_layers().count(), 0);
    assert!(layers.editable().is_some());
    assert!(layers.selection().is_some());
}

#[test]
fn test_bad_color_keeps_the_record() {
    let mut state = loaded(
        r##"[{"name":"X","text":["ok","bad"],"x":[1,2],"y":[1,2],"marker":{"color":["#ff0000","not-a-color"]}}]"##,
    );
    let layers = snapshot(&mut state);
    let layer = layers.point_layer("X").unwrap();
    assert_eq!(layer.points.len(), 2);
    assert_eq!(layer.points[1].fill, FALLBACK_COLOR);
    assert_eq!(layer.points[0].fill, Color32::from_rgb(255, 0, 0));
}

#[test]
fn test_no_layers_before_dataset() {
    let mut state = MapState::new();
    assert!(state.layers().is_none());
    state.execute(Command::ToggleCluster("X".into()));
    assert!(state.layers().is_none());
}

#[test]
fn test_recompose_only_on_dependency_change() {
    let mut state = loaded(THREE_CLUSTERS);
    let before = state.dependencies();
    let first = snapshot(&mut state);

    // unknown clusters change nothing
    assert!(!state.execute(Command::ToggleCluster("nope".into())));
    assert_eq!(state.dependencies(), before);
    assert_eq!(snapshot(&mut state), first);

    state.execute(Command::ToggleCluster("A".into()));
    assert_ne!(state.dependencies(), before);
    assert_ne!(snapshot(&mut state), first);
}

#[test]
fn test_color_trigger_follows_dataset_revision() {
    let mut state = loaded(THREE_CLUSTERS);
    let trigger = state.dependencies().dataset;
    let layers = snapshot(&mut state);
    assert!(layers.point_layers().all(|l| l.color_trigger == trigger));

    // visibility changes do not ask for a recolor
    state.execute(Command::ToggleCluster("A".into()));
    let layers = snapshot(&mut state);
    assert!(layers.point_layers().all(|l| l.color_trigger == trigger));
}

#[test]
fn test_duplicate_name_joins_first_cluster_layer() {
    let mut state = loaded(
        r##"[
            {"name":"A","text":["a1"],"x":[1],"y":[1],"marker":{"color":["#ff0000"]}},
            {"name":"B","text":["b1"],"x":[2],"y":[2],"marker":{"color":["#0000ff"]}},
            {"name":"A","text":["a2"],"x":[3],"y":[3],"marker":{"color":["#00ff00"]}}
        ]"##,
    );
    assert_eq!(state.registry().len(), 2);
    assert_eq!(state.registry().get("A").unwrap().color, "#ff0000");

    let layers = snapshot(&mut state);
    assert_eq!(layers.point_layers().count(), 2);
    let layer = layers.point_layer("A").unwrap();
    assert_eq!(layer.id, "cluster-A");
    assert_eq!(layer.points.len(), 2);
    assert_eq!(layer.points[0].fill, Color32::from_rgb(255, 0, 0));
    assert_eq!(layer.points[1].fill, Color32::from_rgb(0, 255, 0));
    assert_eq!(layer.points[1].tooltip, "a2 (Cluster A)");
}
