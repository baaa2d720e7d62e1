use crate::geometry::{compute_alignment_guides, snap_to_guides, AlignAxis, AlignmentGuides};
use crate::input::{resolve_shortcut, InputEvent, ModifierState, ShortcutCommand};
use crate::serialization::{export_document_pretty, load_document, save_document};
use crate::table::{specification_rows, SpecificationRow};
use crate::validation::{ValidatedDiagram, ValidationResult};
use crate::{
    palette, starter, Connection, DiagramEvent, DiagramStore, Document, DocumentStats, DragCoalescer,
    Edge, EdgePatch, EditorConfig, History, ImportError, Node, NodeKind, NodePatch, Position,
    Selection, Size,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Collaborator that re-reads the diagram after every change
/// (canvas view, property panel, table view)
pub trait DiagramObserver {
    fn diagram_changed(&mut self, events: &[DiagramEvent], store: &DiagramStore);
}

/// Command surface for the palette, property panel and canvas.
///
/// Every command runs mutate, then commit, then notify. A drag waiting out
/// its quiet period, or an unconfirmed panel edit, is committed before any
/// other command touches the store.
pub struct Editor {
    store: DiagramStore,
    history: History,
    drag: DragCoalescer,
    modifiers: ModifierState,

    /// Helper lines for the drag in progress
    guides: AlignmentGuides,

    /// Panel edits applied but not yet committed
    edit_pending: bool,

    observers: Vec<Box<dyn DiagramObserver>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with an empty diagram
    pub fn new(config: EditorConfig) -> Self {
        let depth = config.history_depth;
        let store = DiagramStore::with_config(config);
        Self::from_store(store, depth)
    }

    /// Create an editor preloaded with the bundled server creation flow.
    /// The starter diagram is the initial history state.
    pub fn with_starter_diagram(config: EditorConfig) -> Result<Self, ImportError> {
        Ok(Self::with_document(config, starter::server_creation_flow()?))
    }

    /// Create an editor whose initial state is the given document
    pub fn with_document(config: EditorConfig, document: Document) -> Self {
        let depth = config.history_depth;
        let mut store = DiagramStore::with_config(config);
        store.replace(document);
        store.drain_events();
        Self::from_store(store, depth)
    }

    fn from_store(store: DiagramStore, depth: usize) -> Self {
        let history = History::new(store.snapshot(), depth);
        Self {
            store,
            history,
            drag: DragCoalescer::new(),
            modifiers: ModifierState::default(),
            guides: AlignmentGuides::default(),
            edit_pending: false,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn DiagramObserver>) {
        self.observers.push(observer);
    }

    // ========== Read access ==========

    pub fn store(&self) -> &DiagramStore {
        &self.store
    }

    pub fn nodes(&self) -> &[Node] {
        self.store.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.store.edges()
    }

    pub fn selection(&self) -> &Selection {
        self.store.selection()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        self.store.config()
    }

    /// Helper lines to draw for the current drag
    pub fn guides(&self) -> AlignmentGuides {
        self.guides
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.drag.pending().is_some() || self.edit_pending
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ========== Commit protocol ==========

    fn commit(&mut self, label: impl Into<String>) {
        self.history.commit(label, self.store.snapshot());
    }

    fn notify(&mut self) {
        let events = self.store.drain_events();
        if events.is_empty() {
            return;
        }
        for observer in &mut self.observers {
            observer.diagram_changed(&events, &self.store);
        }
    }

    /// Commit a settled drag still in its quiet period. A gesture that was
    /// never ended settles where the node currently is.
    fn flush_drag(&mut self) -> bool {
        let interrupted = self.drag.active().map(str::to_string);
        if interrupted.is_some() {
            self.drag.cancel();
            self.guides = AlignmentGuides::default();
        }

        if let Some(pending) = self.drag.take_pending() {
            debug!("Flushing pending \"{}\"", pending.label);
            self.commit(pending.label);
            return true;
        }

        match interrupted {
            Some(id) if self.store.snapshot() != self.history.current().snapshot => {
                debug!("Committing interrupted drag of {}", id);
                self.commit(format!("Move {}", id));
                true
            }
            _ => false,
        }
    }

    fn flush_edit(&mut self) -> bool {
        if !self.edit_pending {
            return false;
        }
        self.edit_pending = false;
        self.commit("Edit properties");
        true
    }

    /// Commit everything still pending
    pub fn flush_pending(&mut self) -> bool {
        let dragged = self.flush_drag();
        let edited = self.flush_edit();
        dragged || edited
    }

    fn finish(&mut self, changed: bool, label: impl Into<String>) -> bool {
        if changed {
            self.commit(label);
        }
        self.notify();
        changed
    }

    // ========== Node commands ==========

    pub fn add_node(&mut self, kind: NodeKind, position: Option<Position>) -> Node {
        self.flush_pending();
        let node = self.store.add_node(kind, position);
        self.finish(true, format!("Add {}", node.node_type()));
        node
    }

    /// Add a palette template at the default placement
    pub fn add_from_palette(&mut self, category: &str, index: usize) -> Option<Node> {
        let template = palette::find_template(category, index)?;
        Some(self.add_node(template.kind, None))
    }

    /// Apply and commit a property change
    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> bool {
        self.flush_pending();
        let changed = self.store.update_node(id, patch);
        self.finish(changed, format!("Edit {}", id))
    }

    /// Apply a property change while the user is still typing. Nothing is
    /// committed until [`Editor::confirm_edit`] or the next other command.
    pub fn preview_node_edit(&mut self, id: &str, patch: NodePatch) -> bool {
        self.flush_drag();
        let changed = self.store.update_node(id, patch);
        self.edit_pending |= changed;
        self.notify();
        changed
    }

    pub fn confirm_edit(&mut self) -> bool {
        self.flush_drag();
        self.flush_edit()
    }

    pub fn resize_node(&mut self, id: &str, size: Size) -> bool {
        self.flush_pending();
        let changed = self.store.set_node_size(id, size);
        self.finish(changed, format!("Resize {}", id))
    }

    pub fn delete_node(&mut self, id: &str) -> bool {
        self.flush_pending();
        let changed = self.store.delete_node(id);
        self.finish(changed, format!("Delete {}", id))
    }

    /// Delete several nodes as one history entry
    pub fn delete_nodes(&mut self, ids: &[&str]) -> bool {
        self.flush_pending();
        let changed = self.store.delete_nodes(ids.iter().copied());
        self.finish(changed, format!("Delete {} nodes", ids.len()))
    }

    pub fn delete_selection(&mut self) -> bool {
        self.flush_pending();
        let changed = self.store.delete_selection();
        self.finish(changed, "Delete selection")
    }

    // ========== Edge commands ==========

    pub fn connect(&mut self, connection: Connection) -> Option<Edge> {
        self.flush_pending();
        let edge = self.store.connect(connection);
        if let Some(edge) = &edge {
            let label = format!("Connect {} -> {}", edge.source, edge.target);
            self.finish(true, label);
        }
        edge
    }

    pub fn update_edge(&mut self, id: &str, patch: EdgePatch) -> bool {
        self.flush_pending();
        let changed = self.store.update_edge(id, patch);
        self.finish(changed, format!("Edit {}", id))
    }

    pub fn delete_edge(&mut self, id: &str) -> bool {
        self.flush_pending();
        let changed = self.store.delete_edge(id);
        self.finish(changed, format!("Delete {}", id))
    }

    // ========== Selection ==========

    /// Selection is not part of history
    pub fn select(&mut self, selection: Selection) -> bool {
        let changed = self.store.select(selection);
        self.notify();
        changed
    }

    pub fn select_all_nodes(&mut self) -> bool {
        let changed = self.store.select_all_nodes();
        self.notify();
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.store.clear_selection();
        self.notify();
        changed
    }

    pub fn align_selection_horizontally(&mut self) -> bool {
        self.align_selection(AlignAxis::Horizontal)
    }

    pub fn align_selection_vertically(&mut self) -> bool {
        self.align_selection(AlignAxis::Vertical)
    }

    fn align_selection(&mut self, axis: AlignAxis) -> bool {
        self.flush_pending();
        let changed = self.store.align_selection(axis);
        self.finish(changed, format!("Align {:?}", axis))
    }

    // ========== Drag gestures ==========

    /// Start dragging a node. A drag still in its quiet period stays pending
    /// and is replaced when this one ends.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        if self.store.node(id).is_none() {
            debug!("Ignoring drag of missing node {}", id);
            return false;
        }
        self.flush_edit();
        self.drag.begin(id);
        self.guides = AlignmentGuides::default();
        true
    }

    /// Intermediate drag position. Moves the node without touching history
    /// and returns the helper lines to draw.
    pub fn drag_node(&mut self, id: &str, position: Position) -> AlignmentGuides {
        if self.drag.active() != Some(id) && !self.begin_drag(id) {
            return AlignmentGuides::default();
        }

        self.store.set_node_position(id, position);
        self.guides = self.current_guides(id);
        self.notify();
        self.guides
    }

    fn current_guides(&self, id: &str) -> AlignmentGuides {
        if !self.modifiers.alignment_held() {
            return AlignmentGuides::default();
        }
        match self.store.node(id) {
            Some(node) => compute_alignment_guides(node, self.store.nodes(), self.config().snap_threshold),
            None => AlignmentGuides::default(),
        }
    }

    pub fn end_drag(&mut self, id: &str, position: Position) -> bool {
        self.end_drag_at(id, position, Utc::now())
    }

    /// Drop the node. With helper lines active the position is snapped first.
    /// The history commit is scheduled for after the quiet period.
    pub fn end_drag_at(&mut self, id: &str, position: Position, now: DateTime<Utc>) -> bool {
        let Some(node) = self.store.node(id) else {
            debug!("Ignoring drag end for missing node {}", id);
            self.drag.cancel();
            return false;
        };

        let mut dropped = position;
        if self.modifiers.alignment_held() {
            let mut probe = node.clone();
            probe.position = position;
            let threshold = self.config().snap_threshold;
            let guides = compute_alignment_guides(&probe, self.store.nodes(), threshold);
            dropped = snap_to_guides(position, &guides, probe.effective_size(), threshold);
        }

        self.store.set_node_position(id, dropped);
        let delay = self.config().drag_commit_delay();
        self.drag.end(format!("Move {}", id), now, delay);
        self.guides = AlignmentGuides::default();
        self.notify();
        true
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Utc::now())
    }

    /// Commit a settled drag once its quiet period has passed
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> bool {
        match self.drag.take_due(now) {
            Some(pending) => {
                self.commit(pending.label);
                true
            }
            None => false,
        }
    }

    // ========== History ==========

    pub fn undo(&mut self) -> bool {
        self.flush_pending();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.store.restore(snapshot);
        self.notify();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.flush_pending();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.store.restore(snapshot);
        self.notify();
        true
    }

    // ========== Import / export ==========

    /// Current diagram as indented document text
    pub fn export_document(&self) -> serde_json::Result<String> {
        export_document_pretty(self.store.nodes(), self.store.edges())
    }

    /// Replace the diagram with parsed document text.
    ///
    /// On error the diagram is untouched. On success the selection is
    /// cleared and the import is one undoable history entry.
    pub fn import_document(&mut self, text: &str) -> Result<(), ImportError> {
        let document = crate::import_document(text)?;
        self.apply_import(document);
        Ok(())
    }

    fn apply_import(&mut self, document: Document) {
        self.flush_pending();
        info!(
            "Importing {} nodes and {} edges",
            document.nodes.len(),
            document.edges.len()
        );
        self.store.replace(document);
        self.finish(true, "Import");
    }

    /// Write the diagram into `dir` under the configured export file name
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.config().export_file_name);
        save_document(&path, &self.store.snapshot())
            .with_context(|| format!("Failed to export diagram to {}", dir.display()))?;
        info!("Exported diagram to {}", path.display());
        Ok(path)
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        let document = load_document(path)?;
        self.apply_import(document);
        Ok(())
    }

    pub fn document_stats(&self) -> serde_json::Result<DocumentStats> {
        let text = self.export_document()?;
        Ok(self.store.snapshot().stats(&text))
    }

    // ========== Derived views ==========

    pub fn validate(&self) -> ValidationResult {
        self.store.validate()
    }

    pub fn specification_rows(&self) -> Vec<SpecificationRow> {
        specification_rows(self.store.nodes())
    }

    // ========== Keyboard ==========

    /// Track modifiers and run the shortcut a key press maps to.
    ///
    /// `Export` is only reported back; writing the file is the shell's job.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<ShortcutCommand> {
        self.modifiers.apply(&event);
        if !self.modifiers.alignment_held() {
            self.guides = AlignmentGuides::default();
        }

        let InputEvent::KeyDown { key, modifiers } = event else {
            return None;
        };
        let command = resolve_shortcut(key, modifiers)?;

        match command {
            ShortcutCommand::DeleteSelection => {
                self.delete_selection();
            }
            ShortcutCommand::Undo => {
                self.undo();
            }
            ShortcutCommand::Redo => {
                self.redo();
            }
            ShortcutCommand::SelectAll => {
                self.select_all_nodes();
            }
            ShortcutCommand::ClearSelection => {
                self.clear_selection();
            }
            ShortcutCommand::Export => {}
        }

        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, Modifiers};
    use crate::{DataPatch, EventType, NodeType, ProcessData};
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn process(label: &str) -> NodeKind {
        NodeKind::Process(ProcessData::labelled(label))
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    struct Recorder(Rc<RefCell<Vec<(EventType, usize)>>>);

    impl DiagramObserver for Recorder {
        fn diagram_changed(&mut self, events: &[DiagramEvent], store: &DiagramStore) {
            let mut seen = self.0.borrow_mut();
            for event in events {
                seen.push((event.event.clone(), store.node_count()));
            }
        }
    }

    #[test]
    fn test_add_commits_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut editor = Editor::default();
        editor.add_observer(Box::new(Recorder(seen.clone())));

        let node = editor.add_node(process("A"), None);

        assert_eq!(editor.history().len(), 2);
        assert_eq!(*seen.borrow(), vec![(EventType::NodeAdded { id: node.id }, 1)]);
    }

    #[test]
    fn test_noop_commands_leave_history_alone() {
        let mut editor = Editor::default();
        assert!(!editor.delete_node("ghost"));
        assert!(!editor.update_edge("ghost", EdgePatch::default()));
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_drag_commits_once_after_delay() {
        let mut editor = Editor::default();
        let node = editor.add_node(process("A"), Some(Position::new(0.0, 0.0)));
        let before = editor.history().len();

        editor.begin_drag(&node.id);
        for step in 1..=50 {
            editor.drag_node(&node.id, Position::new(step as f64, 0.0));
        }
        editor.end_drag_at(&node.id, Position::new(50.0, 0.0), at(0));

        assert_eq!(editor.history().len(), before);
        assert!(!editor.tick_at(at(100)));
        assert!(editor.tick_at(at(300)));
        assert_eq!(editor.history().len(), before + 1);
        assert!(!editor.tick_at(at(900)));
    }

    #[test]
    fn test_second_drag_end_replaces_pending() {
        let mut editor = Editor::default();
        let node = editor.add_node(process("A"), Some(Position::new(0.0, 0.0)));
        let before = editor.history().len();

        editor.end_drag_at(&node.id, Position::new(10.0, 0.0), at(0));
        editor.begin_drag(&node.id);
        editor.end_drag_at(&node.id, Position::new(20.0, 0.0), at(200));

        assert!(!editor.tick_at(at(300)));
        assert!(editor.tick_at(at(500)));
        assert_eq!(editor.history().len(), before + 1);
    }

    #[test]
    fn test_pending_drag_flushed_before_next_command() {
        let mut editor = Editor::default();
        let node = editor.add_node(process("A"), Some(Position::new(0.0, 0.0)));

        editor.end_drag_at(&node.id, Position::new(40.0, 0.0), at(0));
        assert!(editor.can_undo());
        assert!(editor.undo());

        assert_eq!(editor.store().node(&node.id).map(|n| n.position), Some(Position::new(0.0, 0.0)));
        assert!(editor.redo());
        assert_eq!(editor.store().node(&node.id).map(|n| n.position), Some(Position::new(40.0, 0.0)));
    }

    #[test]
    fn test_undo_during_drag_settles_gesture_first() {
        let mut editor = Editor::default();
        let node = editor.add_node(process("A"), Some(Position::new(0.0, 0.0)));
        let before = editor.history().len();

        editor.begin_drag(&node.id);
        editor.drag_node(&node.id, Position::new(50.0, 50.0));
        assert!(editor.undo());

        assert!(editor.drag.active().is_none());
        assert_eq!(editor.history().len(), before + 1);
        assert_eq!(editor.store().node(&node.id).map(|n| n.position), Some(Position::new(0.0, 0.0)));

        assert!(editor.redo());
        assert_eq!(editor.store().node(&node.id).map(|n| n.position), Some(Position::new(50.0, 50.0)));
        assert!(!editor.tick_at(at(10_000)));
    }

    #[test]
    fn test_unmoved_drag_adds_no_entry() {
        let mut editor = Editor::default();
        let a = editor.add_node(process("A"), Some(Position::new(0.0, 0.0)));
        let before = editor.history().len();

        editor.begin_drag(&a.id);
        editor.add_node(process("B"), None);

        assert!(editor.drag.active().is_none());
        assert_eq!(editor.history().len(), before + 1);
    }

    #[test]
    fn test_unchanged_update_adds_no_entry() {
        let mut editor = Editor::default();
        let node = editor.add_node(process("A"), Some(Position::new(10.0, 10.0)));
        let before = editor.history().len();

        assert!(!editor.update_node(&node.id, NodePatch::position(Position::new(10.0, 10.0))));
        assert!(!editor.update_node(&node.id, NodePatch::data(DataPatch::label_for(NodeType::Process, "A"))));
        assert_eq!(editor.history().len(), before);
    }

    #[test]
    fn test_shift_drag_snaps_on_drop() {
        let config = EditorConfig {
            drag_commit_delay_ms: 0,
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);
        let anchor = editor.add_node(process("anchor"), Some(Position::new(0.0, 100.0)));
        editor.resize_node(&anchor.id, Size::new(100.0, 40.0));
        let moving = editor.add_node(process("moving"), Some(Position::new(300.0, 300.0)));
        editor.resize_node(&moving.id, Size::new(100.0, 40.0));

        editor.handle_input(InputEvent::KeyDown {
            key: Key::Shift,
            modifiers: Modifiers::NONE,
        });
        editor.begin_drag(&moving.id);
        let guides = editor.drag_node(&moving.id, Position::new(300.0, 106.0));
        assert_eq!(guides.horizontal, Some(100.0));

        editor.end_drag_at(&moving.id, Position::new(300.0, 106.0), at(0));
        assert_eq!(
            editor.store().node(&moving.id).map(|n| n.position),
            Some(Position::new(300.0, 100.0))
        );
        assert!(editor.guides().is_empty());
    }

    #[test]
    fn test_drag_without_shift_shows_no_guides() {
        let mut editor = Editor::default();
        let a = editor.add_node(process("a"), Some(Position::new(0.0, 100.0)));
        let b = editor.add_node(process("b"), Some(Position::new(300.0, 300.0)));
        editor.resize_node(&a.id, Size::new(100.0, 40.0));
        editor.resize_node(&b.id, Size::new(100.0, 40.0));

        assert!(editor.drag_node(&b.id, Position::new(300.0, 102.0)).is_empty());
    }

    #[test]
    fn test_preview_edits_commit_once() {
        let mut editor = Editor::default();
        let node = editor.add_node(process("A"), None);
        let before = editor.history().len();

        for label in ["S", "Se", "Ser", "Server"] {
            let patch = NodePatch::data(crate::DataPatch::label_for(node.node_type(), label));
            editor.preview_node_edit(&node.id, patch);
        }
        assert_eq!(editor.history().len(), before);
        assert!(editor.confirm_edit());
        assert_eq!(editor.history().len(), before + 1);
        assert!(!editor.confirm_edit());
        assert_eq!(editor.store().node(&node.id).map(Node::label), Some("Server"));
    }

    #[test]
    fn test_import_failure_keeps_state() {
        let mut editor = Editor::default();
        editor.add_node(process("A"), None);
        let before = editor.store().snapshot();
        let history = editor.history().len();

        assert!(editor.import_document("{not json").is_err());
        assert!(editor.import_document(r#"{"nodes": {}, "edges": []}"#).is_err());

        assert_eq!(editor.store().snapshot(), before);
        assert_eq!(editor.history().len(), history);
    }

    #[test]
    fn test_import_is_undoable_and_clears_selection() {
        let mut editor = Editor::default();
        let node = editor.add_node(process("A"), None);
        editor.select(Selection::node(&node.id));

        editor
            .import_document(r#"{"nodes": [], "edges": [{"id": "e1", "source": "x", "target": "y"}]}"#)
            .unwrap();
        assert_eq!(editor.nodes().len(), 0);
        assert_eq!(editor.edges().len(), 1);
        assert!(editor.selection().is_empty());

        assert!(editor.undo());
        assert_eq!(editor.nodes().len(), 1);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut editor = Editor::default();
        editor.add_node(process("A"), None);
        editor.add_node(process("B"), None);

        let ctrl = |c| InputEvent::KeyDown {
            key: Key::Char(c),
            modifiers: Modifiers::COMMAND,
        };

        assert_eq!(editor.handle_input(ctrl('a')), Some(ShortcutCommand::SelectAll));
        assert_eq!(editor.selection().node_count(), 2);

        let delete = InputEvent::KeyDown {
            key: Key::Delete,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(editor.handle_input(delete), Some(ShortcutCommand::DeleteSelection));
        assert!(editor.nodes().is_empty());

        editor.handle_input(ctrl('z'));
        assert_eq!(editor.nodes().len(), 2);
        editor.handle_input(ctrl('y'));
        assert!(editor.nodes().is_empty());

        assert_eq!(editor.handle_input(ctrl('s')), Some(ShortcutCommand::Export));
    }

    #[test]
    fn test_palette_and_starter() {
        let mut editor = Editor::with_starter_diagram(EditorConfig::default()).unwrap();
        assert!(!editor.can_undo());
        assert!(!editor.specification_rows().is_empty());

        let node = editor.add_from_palette("Groups", 0).unwrap();
        assert!(node.is_group());
        assert!(editor.add_from_palette("Groups", 5).is_none());

        let stats = editor.document_stats().unwrap();
        assert_eq!(stats.nodes, 49);
        assert!(stats.characters > 0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut editor = Editor::default();
        editor.add_node(process("A"), None);

        let path = editor.save_to_dir(temp_dir.path()).unwrap();
        assert!(path.ends_with("next-server-diagram.json"));

        let mut other = Editor::default();
        other.load_from_file(&path).unwrap();
        assert_eq!(other.nodes(), editor.nodes());
        assert!(other.load_from_file(&temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_drag_commit_delay_from_config() {
        let config = EditorConfig {
            drag_commit_delay_ms: 1000,
            ..EditorConfig::default()
        };
        assert_eq!(config.drag_commit_delay(), Duration::milliseconds(1000));
    }
}
