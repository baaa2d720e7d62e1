// Helper functions to build test diagrams with various shapes
#![allow(dead_code)]

use flow_diagram_editor::{
    Connection, DecisionData, Editor, EditorConfig, GroupData, NodeKind, NoteData, Position,
    ProcessData, Section, Size,
};

pub fn process(label: &str) -> NodeKind {
    NodeKind::Process(ProcessData::labelled(label))
}

/// A short linear flow: request -> check -> (yes) create / (no) error
/// Returns the editor and the node ids in that order.
pub fn create_branching_flow() -> (Editor, Vec<String>) {
    let mut editor = Editor::new(EditorConfig::default());

    let request = editor.add_node(
        NodeKind::Process(ProcessData::labelled("Create server request").in_section(Section::UserAction)),
        Some(Position::new(100.0, 100.0)),
    );
    let check = editor.add_node(
        NodeKind::Decision(DecisionData {
            yes_label: Some("Yes".to_string()),
            no_label: Some("No".to_string()),
            ..DecisionData::labelled("Quota available?")
        }),
        Some(Position::new(100.0, 250.0)),
    );
    let create = editor.add_node(process("Create server"), Some(Position::new(100.0, 400.0)));
    let error = editor.add_node(
        NodeKind::Process(ProcessData::labelled("Quota exceeded").in_section(Section::Error)),
        Some(Position::new(350.0, 250.0)),
    );

    editor.connect(Connection::new(&request.id, &check.id));
    editor.connect(Connection::new(&check.id, &create.id));
    editor.connect(Connection::new(&check.id, &error.id));

    let ids = vec![request.id, check.id, create.id, error.id];
    (editor, ids)
}

/// A group holding two sized nodes and a note outside it
pub fn create_grouped_diagram() -> (Editor, String, Vec<String>) {
    let mut editor = Editor::new(EditorConfig::default());

    let group = editor.add_node(
        NodeKind::Group(GroupData::labelled("Network setup")),
        Some(Position::new(0.0, 0.0)),
    );

    let mut children = Vec::new();
    for (i, label) in ["Create VPC", "Configure subnet"].into_iter().enumerate() {
        let node = editor.add_node(process(label), Some(Position::new(40.0, 40.0 + 120.0 * i as f64)));
        editor.resize_node(&node.id, Size::new(150.0, 60.0));
        editor.update_node(
            &node.id,
            flow_diagram_editor::NodePatch {
                parent_id: Some(Some(group.id.clone())),
                ..Default::default()
            },
        );
        children.push(node.id);
    }

    let note = editor.add_node(
        NodeKind::Note(NoteData::labelled("Rollback policy")),
        Some(Position::new(500.0, 0.0)),
    );
    editor.connect(Connection::new(&children[1], &note.id));

    (editor, group.id, children)
}
