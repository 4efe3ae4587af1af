use nodedoc::config::MarkerPolicy;
use nodedoc::model::{Element, ElementKind, NodeDescriptor, Side};
use nodedoc::sequencer::{PortSequencer, operation_mode};

fn input(index: usize, name: &str, ty: &str) -> Element {
    Element::new(index, name, ElementKind::Input { value_type: ty.into() })
}

fn output_list(index: usize, name: &str, constraint: Option<&str>) -> Element {
    Element::new(
        index,
        name,
        ElementKind::OutputList {
            type_constraint: constraint.map(Into::into),
        },
    )
}

fn list_end(index: usize, name: &str, side: Side, label: &str) -> Element {
    Element::new(
        index,
        name,
        ElementKind::ListEnd {
            side,
            label: label.into(),
        },
    )
}

fn names(elements: &[Element]) -> Vec<&str> {
    elements.iter().map(|e| e.name.as_str()).collect()
}

/// A node using all eight groups.
fn busy_node() -> NodeDescriptor {
    NodeDescriptor {
        qualified_name: "Ns.Busy".into(),
        display_name: "Busy".into(),
        fixed_operations: vec![Element::new(0, "Run", ElementKind::Operation { is_async: false })],
        dynamic_operations: vec![Element::new(
            0,
            "Triggers",
            ElementKind::OperationList {
                supports_sync: true,
                supports_async: false,
            },
        )],
        fixed_inputs: vec![input(0, "A", "Single")],
        dynamic_inputs: vec![
            Element::new(0, "Values", ElementKind::InputList { value_type: "Int32".into() }),
            Element::new(1, "Flags", ElementKind::InputList { value_type: "Boolean".into() }),
        ],
        fixed_impulses: vec![Element::new(0, "Next", ElementKind::Impulse { impulse_type: "Continuation".into() })],
        dynamic_impulses: vec![Element::new(0, "Branches", ElementKind::ImpulseList { impulse_type: None })],
        fixed_outputs: vec![Element::new(0, "Sum", ElementKind::Output { output_type: "Single".into() })],
        dynamic_outputs: vec![output_list(0, "Results", Some("IValue"))],
        ..Default::default()
    }
}

#[test]
fn interleaves_fixed_inputs_with_dynamic_output() {
    let node = NodeDescriptor {
        fixed_inputs: vec![input(0, "a", "Single"), input(1, "b", "Single")],
        dynamic_outputs: vec![output_list(0, "c", None)],
        ..Default::default()
    };
    let seq = PortSequencer::new(MarkerPolicy::Emit);

    assert_eq!(seq.input_side(&node), node.fixed_inputs);
    assert_eq!(
        seq.output_side(&node),
        vec![output_list(0, "c", None), list_end(0, "c", Side::Output, "*")]
    );
    assert_eq!(
        seq.sequence(&node),
        vec![
            input(0, "a", "Single"),
            output_list(0, "c", None),
            input(1, "b", "Single"),
            list_end(0, "c", Side::Output, "*"),
        ]
    );
}

#[test]
fn one_list_end_per_dynamic_list() {
    let node = busy_node();
    let seq = PortSequencer::new(MarkerPolicy::Emit).sequence(&node);
    assert_eq!(seq.len(), node.element_count() + node.dynamic_count());
    assert_eq!(seq.iter().filter(|e| e.is_list_end()).count(), 5);

    // Every list is immediately followed by its own marker on its side.
    let inputs = PortSequencer::new(MarkerPolicy::Emit).input_side(&node);
    assert_eq!(
        names(&inputs),
        vec!["Run", "Triggers", "Triggers", "A", "Values", "Values", "Flags", "Flags"]
    );
    assert!(inputs[2].is_list_end());
    assert!(inputs[5].is_list_end());
    assert!(inputs[7].is_list_end());
}

#[test]
fn omit_policy_adds_no_markers() {
    let node = busy_node();
    let seq = PortSequencer::new(MarkerPolicy::Omit).sequence(&node);
    assert_eq!(seq.len(), node.element_count());
    assert!(!seq.iter().any(Element::is_list_end));
}

#[test]
fn empty_dynamic_groups_add_nothing() {
    let node = NodeDescriptor {
        fixed_inputs: vec![input(0, "a", "Single")],
        ..Default::default()
    };
    let seq = PortSequencer::new(MarkerPolicy::Emit).sequence(&node);
    assert_eq!(seq, vec![input(0, "a", "Single")]);
}

#[test]
fn empty_node_yields_empty_sequence() {
    let node = NodeDescriptor::default();
    assert!(PortSequencer::default().sequence(&node).is_empty());
}

#[test]
fn each_side_keeps_its_order() {
    let node = busy_node();
    let seq = PortSequencer::new(MarkerPolicy::Emit);
    let merged = seq.sequence(&node);

    let inputs: Vec<Element> = merged
        .iter()
        .filter(|e| e.side() == Some(Side::Input))
        .cloned()
        .collect();
    let outputs: Vec<Element> = merged
        .iter()
        .filter(|e| e.side() == Some(Side::Output))
        .cloned()
        .collect();
    assert_eq!(inputs, seq.input_side(&node));
    assert_eq!(outputs, seq.output_side(&node));

    // Strict alternation while both sides last.
    assert_eq!(
        names(&merged[..6]),
        vec!["Run", "Next", "Triggers", "Branches", "Triggers", "Branches"]
    );
}

#[test]
fn list_end_labels() {
    let node = busy_node();
    let seq = PortSequencer::new(MarkerPolicy::Emit);
    let labels = |elements: Vec<Element>| -> Vec<String> {
        elements
            .into_iter()
            .filter_map(|e| match e.kind {
                ElementKind::ListEnd { label, .. } => Some(label),
                _ => None,
            })
            .collect()
    };
    assert_eq!(
        labels(seq.input_side(&node)),
        vec!["SyncOperation", "Int32", "Boolean"]
    );
    assert_eq!(labels(seq.output_side(&node)), vec!["null", "IValue"]);
}

#[test]
fn operation_mode_labels() {
    assert_eq!(operation_mode(true, false), "SyncOperation");
    assert_eq!(operation_mode(false, true), "AsyncOperation");
    assert_eq!(operation_mode(true, true), "MixedOperation");
    assert_eq!(operation_mode(false, false), "NoneOperation");
}
