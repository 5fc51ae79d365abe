use cluster_map::dataset::{fetch_with_retry, parse_series};
use cluster_map::error::DatasetError;
use cluster_map::{ClusterRegistry, Dataset};

#[test]
fn test_registry_keeps_first_occurrence_order() {
    let series = parse_series(
        r##"[
            {"name":"B","marker":{"color":["#0000ff"]}},
            {"name":"A","marker":{"color":["#ff0000"]}},
            {"name":"B","marker":{"color":["#00ff00"]}}
        ]"##,
    )
    .unwrap();
    let registry = ClusterRegistry::derive(&series);
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, ["B", "A"]);
    assert_eq!(registry.get("B").unwrap().color, "#0000ff");
}

#[test]
fn test_mismatched_arrays_use_shorter_length() {
    let series = parse_series(
        r##"[{"name":"A","text":["a"],"x":[1,2,3],"y":[1,2],"marker":{"color":["#ff0000"]}}]"##,
    )
    .unwrap();
    let dataset = Dataset::from_series(&series);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.points()[1].text, "");
    assert_eq!(dataset.points()[1].color, "");
}

#[test]
fn test_bundled_dataset_parses() {
    let body = include_str!("../assets/clusters.json");
    let series = parse_series(body).unwrap();
    let registry = ClusterRegistry::derive(&series);
    assert_eq!(registry.len(), 5);
    assert!(!Dataset::from_series(&series).is_empty());
}

#[test]
fn test_fetch_gives_up_after_bounded_attempts() {
    let mut calls = 0;
    let result = fetch_with_retry(3, |_| {
        calls += 1;
        Err(DatasetError::Status(503))
    });
    assert_eq!(calls, 3);
    assert!(matches!(result, Err(DatasetError::Exhausted { attempts: 3 })));
}

#[test]
fn test_wrong_type_entries_do_not_fail_the_body() {
    let series = parse_series(
        r##"[
            {"name":"A","text":["a1","a2","a3"],"x":[1,["oops"],3],"y":[1,2,3],"marker":{"color":[255,"#ff0000","#ff0000"]}},
            {"name":"B","text":["b1"],"x":[4],"y":[4],"marker":{"color":["#00ff00"]}}
        ]"##,
    )
    .unwrap();
    let dataset = Dataset::from_series(&series);
    let texts: Vec<&str> = dataset.points().iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, ["a1", "a3", "b1"]);
    // a bad color entry defaults to "" and the record stays
    assert_eq!(dataset.points()[0].color, "");

    let registry = ClusterRegistry::derive(&series);
    assert_eq!(registry.get("A").unwrap().color, "#ff0000");
    assert_eq!(registry.len(), 2);
}
