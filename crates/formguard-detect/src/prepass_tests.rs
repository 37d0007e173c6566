use super::*;
use formguard_core::SnapshotBuilder;

fn input(id: u64, parent: u64, ty: &str, y: f64) -> DomNode {
    DomNode::new(id, "input")
        .with_parent(parent)
        .with_attr("type", ty)
        .with_rect(0.0, y, 200.0, 30.0)
}

fn cfg() -> DetectorConfig {
    DetectorConfig::default()
}

#[test]
fn test_forms_and_fields_collected() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "form"))
        .node(input(2, 1, "text", 0.0))
        .node(input(3, 1, "password", 40.0))
        .node(input(4, 1, "submit", 80.0))
        .build()
        .unwrap();

    let prepass = run(&snapshot, &HashSet::new(), &cfg());
    assert_eq!(prepass.forms, vec![1]);
    // The submit control is not a classifiable field.
    assert_eq!(prepass.fields, vec![2, 3]);
    assert!(prepass.clusters.is_empty());
    assert!(prepass.has_candidates());
}

#[test]
fn test_rule_ignored_subtree_is_skipped() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "div"))
        .node(DomNode::new(2, "form").with_parent(1))
        .node(input(3, 2, "password", 0.0))
        .node(DomNode::new(4, "form").with_parent(1))
        .node(input(5, 4, "password", 300.0))
        .build()
        .unwrap();

    let ignored = HashSet::from([2]);
    let prepass = run(&snapshot, &ignored, &cfg());
    assert_eq!(prepass.forms, vec![4]);
    assert_eq!(prepass.fields, vec![5]);
}

#[test]
fn test_oversized_form_dropped_with_its_inputs() {
    let mut builder = SnapshotBuilder::new().node(DomNode::new(1, "form"));
    for i in 0..45u64 {
        builder = builder.node(input(10 + i, 1, "text", i as f64 * 40.0));
    }
    let snapshot = builder
        .node(DomNode::new(100, "form"))
        .node(input(101, 100, "password", 0.0))
        .build()
        .unwrap();

    let prepass = run(&snapshot, &HashSet::new(), &cfg());
    assert_eq!(prepass.forms, vec![100]);
    assert_eq!(prepass.fields, vec![101]);
}

#[test]
fn test_formless_fields_cluster_under_common_ancestor() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "div"))
        .node(DomNode::new(2, "div").with_parent(1))
        .node(input(3, 2, "text", 0.0))
        .node(input(4, 2, "password", 40.0))
        .build()
        .unwrap();

    let prepass = run(&snapshot, &HashSet::new(), &cfg());
    assert!(prepass.forms.is_empty());
    assert_eq!(prepass.clusters.len(), 1);
    assert_eq!(prepass.clusters[0].root, 2);
    assert_eq!(prepass.clusters[0].members, vec![3, 4]);
}

#[test]
fn test_distant_formless_fields_split_clusters() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "div"))
        .node(input(2, 1, "text", 0.0))
        .node(input(3, 1, "text", 800.0))
        .build()
        .unwrap();

    let prepass = run(&snapshot, &HashSet::new(), &cfg());
    assert_eq!(prepass.clusters.len(), 2);
}

#[test]
fn test_single_field_cluster_roots_at_parent() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "div"))
        .node(DomNode::new(2, "div").with_parent(1))
        .node(input(3, 2, "password", 0.0))
        .build()
        .unwrap();

    let prepass = run(&snapshot, &HashSet::new(), &cfg());
    assert_eq!(prepass.clusters.len(), 1);
    assert_eq!(prepass.clusters[0].root, 2);
}

#[test]
fn test_hidden_formless_inputs_do_not_cluster() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "div"))
        .node(input(2, 1, "hidden", 0.0))
        .build()
        .unwrap();

    let prepass = run(&snapshot, &HashSet::new(), &cfg());
    // Still a candidate field, but no synthetic form around it.
    assert_eq!(prepass.fields, vec![2]);
    assert!(prepass.clusters.is_empty());
}
