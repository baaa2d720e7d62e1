mod fixtures;

use fixtures::sample_diagrams::process;
use flow_diagram_editor::{
    export_document, import_document, Connection, DecisionData, Document, Edge, EdgeType, Editor,
    EditorConfig, GroupData, Node, NodeKind, NoteData, Position, ProcessData, Section, Size, Style,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;

fn text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z0-9 ]{1,10}")
}

fn process_data() -> impl Strategy<Value = ProcessData> {
    (
        "[A-Za-z ]{0,12}",
        prop::sample::select(vec![
            Section::UserAction,
            Section::BusinessLogic,
            Section::BillingLogic,
            Section::Error,
            Section::OpenStack,
            Section::Other("custom-lane".to_string()),
        ]),
        text(),
        text(),
        text(),
        text(),
        text(),
        text(),
        text(),
        text(),
    )
        .prop_map(
            |(label, section, icon, description, status, audit_log, audit_status, billing, billing_icon, note)| {
                ProcessData {
                    label,
                    section,
                    icon,
                    description,
                    status,
                    audit_log,
                    audit_status,
                    billing,
                    billing_icon,
                    note,
                }
            },
        )
}

fn node_kind() -> impl Strategy<Value = NodeKind> {
    let label = "[A-Za-z ]{0,12}";
    prop_oneof![
        process_data().prop_map(NodeKind::Process),
        (label, text(), text(), text()).prop_map(|(label, description, yes_label, no_label)| {
            NodeKind::Decision(DecisionData {
                label,
                description,
                yes_label,
                no_label,
            })
        }),
        (label, text(), text(), text()).prop_map(|(label, content, description, emoji)| {
            NodeKind::Note(NoteData {
                label,
                content,
                description,
                emoji,
            })
        }),
        (label, text(), any::<bool>()).prop_map(|(label, color, locked)| {
            NodeKind::Group(GroupData { label, color, locked })
        }),
    ]
}

/// Free-form style maps, sometimes carrying a legacy width/height
fn style() -> impl Strategy<Value = Style> {
    (
        proptest::option::of("#[0-9A-F]{6}"),
        proptest::option::of(1u32..5),
        proptest::option::of((10u32..600, 10u32..600)),
        proptest::option::of(-5i32..5),
    )
        .prop_map(|(stroke, stroke_width, footprint, z_index)| {
            let mut style = Style::new();
            if let Some(stroke) = stroke {
                style.insert("stroke".to_string(), json!(stroke));
            }
            if let Some(stroke_width) = stroke_width {
                style.insert("strokeWidth".to_string(), json!(stroke_width));
            }
            if let Some((width, height)) = footprint {
                style.insert("width".to_string(), json!(width));
                style.insert("height".to_string(), json!(height));
            }
            if let Some(z_index) = z_index {
                style.insert("zIndex".to_string(), json!(z_index));
            }
            style
        })
}

fn handle() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop::sample::select(vec!["top", "bottom", "left", "right"]).prop_map(String::from))
}

/// Diagrams whose edges only reference existing nodes
fn well_formed_document() -> impl Strategy<Value = Document> {
    prop::collection::vec(
        (
            node_kind(),
            -2000i32..2000,
            -2000i32..2000,
            proptest::option::of((10u16..500, 10u16..500)),
            proptest::option::of(style()),
            proptest::option::of(0usize..12),
            proptest::option::of(any::<bool>()),
        ),
        1..12,
    )
    .prop_flat_map(|specs| {
        let count = specs.len();
        let nodes: Vec<Node> = specs
            .into_iter()
            .enumerate()
            .map(|(i, (kind, x, y, size, style, parent, draggable))| {
                let mut node = Node::new(format!("n{}", i), kind, Position::new(x as f64, y as f64));
                node.size = size.map(|(w, h)| Size::new(w as f64, h as f64));
                node.style = style;
                node.parent_id = parent.map(|p| format!("n{}", p % count));
                node.draggable = draggable;
                node
            })
            .collect();

        let edges = prop::collection::vec(
            (
                (0..count, 0..count, handle(), handle()),
                any::<bool>(),
                proptest::option::of("[a-z]{1,6}"),
                prop::sample::select(vec![EdgeType::Default, EdgeType::Straight, EdgeType::Step, EdgeType::SmoothStep]),
                proptest::option::of(style()),
            ),
            0..16,
        );

        (Just(nodes), edges)
    })
    .prop_map(|(nodes, edge_specs)| {
        let edges = edge_specs
            .into_iter()
            .enumerate()
            .map(|(i, ((source, target, source_handle, target_handle), animated, label, edge_type, style))| {
                let mut edge = Edge::new(format!("e{}", i), format!("n{}", source), format!("n{}", target))
                    .animated(animated);
                edge.source_handle = source_handle;
                edge.target_handle = target_handle;
                edge.label = label;
                edge.edge_type = edge_type;
                edge.style = style;
                edge
            })
            .collect();
        Document::new(nodes, edges)
    })
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Connect(usize, usize),
    Delete(usize),
    Move(usize, i32, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        2 => (0usize..20, 0usize..20).prop_map(|(a, b)| Op::Connect(a, b)),
        1 => (0usize..20).prop_map(Op::Delete),
        2 => (0usize..20, -500i32..500, -500i32..500).prop_map(|(i, x, y)| Op::Move(i, x, y)),
    ]
}

fn apply(editor: &mut Editor, op: &Op) {
    let ids: Vec<String> = editor.nodes().iter().map(|n| n.id.clone()).collect();
    let pick = |i: usize| ids.get(i % ids.len().max(1)).cloned();

    match op {
        Op::Add => {
            editor.add_node(process("step"), None);
        }
        Op::Connect(a, b) => {
            if let (Some(a), Some(b)) = (pick(*a), pick(*b)) {
                editor.connect(Connection::new(a, b));
            }
        }
        Op::Delete(i) => {
            if let Some(id) = pick(*i) {
                editor.delete_node(&id);
            }
        }
        Op::Move(i, x, y) => {
            if let Some(id) = pick(*i) {
                editor.update_node(
                    &id,
                    flow_diagram_editor::NodePatch::position(Position::new(*x as f64, *y as f64)),
                );
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_added_node_ids_are_distinct(kinds in prop::collection::vec(node_kind(), 1..60)) {
        let mut editor = Editor::new(EditorConfig::default());
        let mut seen = HashSet::new();

        for kind in kinds {
            let node = editor.add_node(kind, None);
            prop_assert!(seen.insert(node.id));
        }
        prop_assert_eq!(seen.len(), editor.nodes().len());
    }

    #[test]
    fn prop_undo_then_redo_restores_state(ops in prop::collection::vec(op(), 1..30), back in 0usize..30) {
        let mut editor = Editor::new(EditorConfig::default());
        for op in &ops {
            apply(&mut editor, op);
        }

        let before = editor.store().snapshot();
        let steps = back.min(editor.history().pointer());

        for _ in 0..steps {
            prop_assert!(editor.undo());
        }
        for _ in 0..steps {
            prop_assert!(editor.redo());
        }

        prop_assert_eq!(editor.store().snapshot(), before);
    }

    #[test]
    fn prop_export_import_round_trip(document in well_formed_document()) {
        let text = export_document(&document.nodes, &document.edges).unwrap();
        let imported = import_document(&text).unwrap();
        prop_assert_eq!(imported, document);
    }

    #[test]
    fn prop_deleted_node_leaves_no_edges(ops in prop::collection::vec(op(), 1..30), victim in 0usize..20) {
        let mut editor = Editor::new(EditorConfig::default());
        for op in &ops {
            apply(&mut editor, op);
        }
        let Some(id) = editor.nodes().get(victim % editor.nodes().len().max(1)).map(|n| n.id.clone()) else {
            return Ok(());
        };

        editor.delete_node(&id);
        prop_assert!(editor.edges().iter().all(|e| e.source != id && e.target != id));
    }
}

#[test]
fn test_undo_at_initial_state_is_noop() {
    let mut editor = Editor::new(EditorConfig::default());
    let before = editor.store().snapshot();

    assert!(!editor.undo());
    assert_eq!(editor.store().snapshot(), before);
    assert_eq!(editor.history().pointer(), 0);
}

#[test]
fn test_style_only_footprint_round_trips() {
    let mut style = Style::new();
    style.insert("width".to_string(), json!(200));
    style.insert("height".to_string(), json!(100));
    let mut node = Node::new("memo", NodeKind::Note(NoteData::labelled("Memo")), Position::new(5.0, 5.0));
    node.style = Some(style);
    let document = Document::new(vec![node], Vec::new());

    let text = export_document(&document.nodes, &document.edges).unwrap();
    let imported = import_document(&text).unwrap();

    assert_eq!(imported, document);
    assert_eq!(imported.nodes[0].size, None);
    assert_eq!(imported.nodes[0].effective_size(), Size::new(200.0, 100.0));
}
