use nodedoc::config::DEFAULT_MARKUP_PATTERN;
use nodedoc::model::{Element, ElementKind, RoleTag, Side};
use nodedoc::render::RowRenderer;

fn renderer() -> RowRenderer {
    RowRenderer::new(DEFAULT_MARKUP_PATTERN).expect("default pattern compiles")
}

fn row(kind: ElementKind) -> (RoleTag, String) {
    let r = renderer()
        .render(&Element::new(0, "X", kind))
        .expect("known kind renders");
    (r.role, r.type_label)
}

#[test]
fn escapes_name_and_type() {
    let element = Element::new(
        0,
        "A`B|C<i>x</i>",
        ElementKind::Input {
            value_type: "List`1|<T>".into(),
        },
    );
    let r = renderer().render(&element).unwrap();
    assert_eq!(r.display_label, "A\\`B\\|Cx");
    // Type labels keep markup-looking text.
    assert_eq!(r.type_label, "List\\`1\\|<T>");
    assert_eq!(r.to_string(), "| input | List\\`1\\|<T> | A\\`B\\|Cx |");
}

#[test]
fn maps_every_kind() {
    assert_eq!(
        row(ElementKind::Operation { is_async: false }),
        (RoleTag::Input, "SyncOperation".into())
    );
    assert_eq!(
        row(ElementKind::Operation { is_async: true }),
        (RoleTag::Input, "AsyncOperation".into())
    );
    assert_eq!(
        row(ElementKind::OperationList {
            supports_sync: true,
            supports_async: true
        }),
        (RoleTag::InputList, "MixedOperation".into())
    );
    assert_eq!(
        row(ElementKind::Input { value_type: "Single".into() }),
        (RoleTag::Input, "Single".into())
    );
    assert_eq!(
        row(ElementKind::InputList { value_type: "Int32".into() }),
        (RoleTag::InputList, "Int32".into())
    );
    assert_eq!(
        row(ElementKind::ListEnd {
            side: Side::Input,
            label: "Int32".into()
        }),
        (RoleTag::InputListButtons, "Int32".into())
    );
    assert_eq!(
        row(ElementKind::Impulse { impulse_type: "Call".into() }),
        (RoleTag::Output, "Call".into())
    );
    assert_eq!(
        row(ElementKind::ImpulseList { impulse_type: None }),
        (RoleTag::OutputList, "null".into())
    );
    assert_eq!(
        row(ElementKind::Output { output_type: "Slot".into() }),
        (RoleTag::Output, "Slot".into())
    );
    assert_eq!(
        row(ElementKind::OutputList { type_constraint: None }),
        (RoleTag::OutputList, "*".into())
    );
    assert_eq!(
        row(ElementKind::ListEnd {
            side: Side::Output,
            label: "*".into()
        }),
        (RoleTag::OutputListButtons, "*".into())
    );
}

#[test]
fn role_tags_text() {
    let tags = [
        RoleTag::Input,
        RoleTag::InputList,
        RoleTag::InputListButtons,
        RoleTag::Output,
        RoleTag::OutputList,
        RoleTag::OutputListButtons,
    ];
    let text: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
    assert_eq!(
        text,
        vec![
            "input",
            "inputlist",
            "inputlistbuttons",
            "output",
            "outputlist",
            "outputlistbuttons"
        ]
    );
}

#[test]
fn unrecognized_kind_is_skipped() {
    let elements = vec![
        Element::new(0, "A", ElementKind::Input { value_type: "Single".into() }),
        Element::new(0, "Weird", ElementKind::Unrecognized { kind: "reference".into() }),
        Element::new(0, "B", ElementKind::Output { output_type: "Single".into() }),
    ];
    let r = renderer();
    assert!(r.render(&elements[1]).is_none());
    let labels: Vec<String> = r.render_all(&elements).map(|row| row.display_label).collect();
    assert_eq!(labels, vec!["A", "B"]);
}

#[test]
fn custom_markup_pattern() {
    let r = RowRenderer::new(r"\[/?b\]").unwrap();
    assert_eq!(r.display_label("[b]Bold[/b] <i>kept</i>"), "Bold <i>kept</i>");
    assert!(RowRenderer::new("(unclosed").is_err());
}
