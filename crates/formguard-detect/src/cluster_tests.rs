use super::*;
use formguard_core::{DomNode, SnapshotBuilder};

fn input(id: u64, parent: u64, y: f64) -> DomNode {
    DomNode::new(id, "input")
        .with_parent(parent)
        .with_rect(0.0, y, 200.0, 30.0)
}

#[test]
fn test_fields_attach_to_nearest_winning_root() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "form").with_rect(0.0, 0.0, 400.0, 400.0))
        .node(DomNode::new(2, "form").with_parent(1).with_rect(0.0, 100.0, 300.0, 200.0))
        .node(input(3, 2, 120.0))
        .node(input(4, 1, 350.0))
        .build()
        .unwrap();

    let forms = BTreeMap::from([(1, FormType::Login), (2, FormType::Mfa)]);
    let fields = BTreeMap::from([
        (3, FieldType::Otp),
        (4, FieldType::Username),
    ]);

    let prediction = assemble_prediction(&snapshot, &forms, &fields);
    assert_eq!(prediction.forms.len(), 2);
    let login = prediction.forms.iter().find(|f| f.element == 1).unwrap();
    let mfa = prediction.forms.iter().find(|f| f.element == 2).unwrap();
    // The nested field belongs to the inner form, not the outer one.
    assert_eq!(mfa.fields, vec![DetectedField { field_type: FieldType::Otp, element: 3 }]);
    assert_eq!(
        login.fields,
        vec![DetectedField { field_type: FieldType::Username, element: 4 }]
    );
    assert!(prediction.dangling.is_empty());
}

#[test]
fn test_empty_noop_form_dropped_but_populated_noop_kept() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "form"))
        .node(DomNode::new(2, "div"))
        .node(input(3, 2, 0.0))
        .build()
        .unwrap();

    let forms = BTreeMap::from([(1, FormType::Noop), (2, FormType::Noop)]);
    let fields = BTreeMap::from([(3, FieldType::PasswordCurrent)]);

    let prediction = assemble_prediction(&snapshot, &forms, &fields);
    assert_eq!(prediction.forms.len(), 1);
    assert_eq!(prediction.forms[0].element, 2);
    assert_eq!(prediction.forms[0].form_type, FormType::Noop);
    assert_eq!(prediction.forms[0].fields.len(), 1);
}

#[test]
fn test_unowned_fields_go_dangling() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "div"))
        .node(input(2, 1, 0.0))
        .build()
        .unwrap();

    let prediction =
        assemble_prediction(&snapshot, &BTreeMap::new(), &BTreeMap::from([(2, FieldType::Email)]));
    assert!(prediction.forms.is_empty());
    assert_eq!(
        prediction.dangling,
        vec![DetectedField { field_type: FieldType::Email, element: 2 }]
    );
    assert!(!prediction.is_empty());
}

#[test]
fn test_fields_sorted_visually() {
    let snapshot = SnapshotBuilder::new()
        .node(DomNode::new(1, "form"))
        .node(input(2, 1, 80.0))
        .node(input(3, 1, 20.0))
        .build()
        .unwrap();

    let forms = BTreeMap::from([(1, FormType::Login)]);
    let fields = BTreeMap::from([
        (2, FieldType::PasswordCurrent),
        (3, FieldType::Username),
    ]);

    let prediction = assemble_prediction(&snapshot, &forms, &fields);
    let elements: Vec<u64> = prediction.forms[0].fields.iter().map(|f| f.element).collect();
    assert_eq!(elements, vec![3, 2]);
}
