use dom::{Document, DomError, DomPatch, NodeKey};
use dom_test_support::{diff_lines, parse_fixture, tree_lines};
use std::sync::Arc;

fn check(actual: Vec<String>, expected: &[&str]) {
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    assert!(actual == expected, "{}", diff_lines(&expected, &actual));
}

#[test]
fn patch_stream_builds_the_same_tree_as_the_fixture() {
    let mut doc = Document::new();
    doc.apply(&[
        DomPatch::CreateDocument {
            key: NodeKey(1),
            doctype: None,
        },
        DomPatch::CreateElement {
            key: NodeKey(2),
            name: Arc::from("p"),
            attributes: Vec::new(),
        },
        DomPatch::CreateText {
            key: NodeKey(3),
            text: "hello ".to_string(),
        },
        DomPatch::CreateElement {
            key: NodeKey(4),
            name: Arc::from("b"),
            attributes: Vec::new(),
        },
        DomPatch::CreateText {
            key: NodeKey(5),
            text: "world".to_string(),
        },
        DomPatch::AppendChild {
            parent: NodeKey(1),
            child: NodeKey(2),
        },
        DomPatch::AppendChild {
            parent: NodeKey(2),
            child: NodeKey(4),
        },
        DomPatch::InsertBefore {
            parent: NodeKey(2),
            child: NodeKey(3),
            before: NodeKey(4),
        },
        DomPatch::AppendChild {
            parent: NodeKey(4),
            child: NodeKey(5),
        },
    ])
    .expect("patches apply");

    let fixture = parse_fixture("<p>hello <b>world</b></p>").expect("fixture");
    check(
        tree_lines(&doc, NodeKey(1)),
        &[
            "#document",
            "  <p>",
            "    \"hello \"",
            "    <b>",
            "      \"world\"",
        ],
    );
    assert_eq!(
        tree_lines(&doc, NodeKey(1)),
        tree_lines(&fixture.doc, fixture.root())
    );
}

#[test]
fn failing_patch_stops_the_batch() {
    let mut doc = Document::with_root();
    let root = doc.root().expect("root");
    let err = doc
        .apply(&[
            DomPatch::CreateText {
                key: NodeKey(10),
                text: "a".to_string(),
            },
            DomPatch::AppendChild {
                parent: root,
                child: NodeKey(10),
            },
            DomPatch::AppendChild {
                parent: NodeKey(10),
                child: root,
            },
            DomPatch::CreateText {
                key: NodeKey(11),
                text: "never".to_string(),
            },
        ])
        .expect_err("appending to a text node fails");
    assert!(matches!(
        err,
        DomError::InvalidParent(_) | DomError::CycleDetected { .. }
    ));
    assert!(doc.is_live(NodeKey(10)));
    assert!(!doc.is_live(NodeKey(11)));
}

#[test]
fn removal_and_text_updates_show_in_the_dump() {
    let mut fixture = parse_fixture("<p>a<b>b</b>c</p>").expect("fixture");
    let b = fixture.resolve("b").expect("b");
    let c = fixture.resolve("text:c").expect("c");
    fixture.doc.remove(b).expect("remove");
    fixture.doc.set_text(c, "see").expect("set text");
    let root = fixture.root();
    check(
        tree_lines(&fixture.doc, root),
        &["#document", "  <p>", "    \"a\"", "    \"see\""],
    );
}
