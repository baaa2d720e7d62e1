use crate::Document;
use chrono::{DateTime, Utc};
use log::{debug, info};
use ulid::Ulid;

/// One retained state of the diagram
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: Ulid,
    pub committed_at: DateTime<Utc>,

    /// Short description of the action that produced this state
    pub label: String,

    pub snapshot: Document,
}

impl HistoryEntry {
    fn new(label: impl Into<String>, snapshot: Document, committed_at: DateTime<Utc>) -> Self {
        Self {
            id: Ulid::new(),
            committed_at,
            label: label.into(),
            snapshot,
        }
    }
}

/// Linear undo/redo over full snapshots.
///
/// There is always at least one entry. `pointer` marks the current state;
/// entries after it form the redo buffer.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    pointer: usize,
    max_depth: usize,
}

impl History {
    /// Start a history whose first entry is `initial`
    pub fn new(initial: Document, max_depth: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::new("Initial state", initial, Utc::now())],
            pointer: 0,
            max_depth: max_depth.max(1),
        }
    }

    pub fn commit(&mut self, label: impl Into<String>, snapshot: Document) -> &HistoryEntry {
        self.commit_at(label, snapshot, Utc::now())
    }

    /// Append a snapshot after the current entry.
    ///
    /// The redo buffer is discarded. When the depth bound is exceeded the
    /// oldest entry is dropped and the pointer shifts with it.
    pub fn commit_at(
        &mut self,
        label: impl Into<String>,
        snapshot: Document,
        now: DateTime<Utc>,
    ) -> &HistoryEntry {
        let discarded = self.entries.len() - self.pointer - 1;
        self.entries.truncate(self.pointer + 1);
        self.entries.push(HistoryEntry::new(label, snapshot, now));
        self.pointer = self.entries.len() - 1;

        while self.entries.len() > self.max_depth {
            self.entries.remove(0);
            self.pointer -= 1;
        }

        let entry = &self.entries[self.pointer];
        debug!(
            "Committed \"{}\" at {} ({} entries, {} redo discarded)",
            entry.label,
            self.pointer,
            self.entries.len(),
            discarded
        );
        entry
    }

    /// Step back. Returns the snapshot to restore, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Document> {
        if self.pointer == 0 {
            debug!("Nothing to undo");
            return None;
        }

        let undone = &self.entries[self.pointer].label;
        info!("Undo \"{}\"", undone);
        self.pointer -= 1;
        Some(&self.entries[self.pointer].snapshot)
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Document> {
        if self.pointer + 1 >= self.entries.len() {
            debug!("Nothing to redo");
            return None;
        }

        self.pointer += 1;
        let entry = &self.entries[self.pointer];
        info!("Redo \"{}\"", entry.label);
        Some(&entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.pointer]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, NodeKind, Position, ProcessData};

    fn doc(count: usize) -> Document {
        let nodes = (0..count)
            .map(|i| {
                Node::new(
                    format!("n{}", i),
                    NodeKind::Process(ProcessData::labelled("step")),
                    Position::default(),
                )
            })
            .collect();
        Document::new(nodes, vec![])
    }

    #[test]
    fn test_undo_redo_walks_pointer() {
        let mut history = History::new(doc(0), 50);
        history.commit("add", doc(1));
        history.commit("add", doc(2));

        assert_eq!(history.undo(), Some(&doc(1)));
        assert_eq!(history.undo(), Some(&doc(0)));
        assert_eq!(history.undo(), None);
        assert_eq!(history.pointer(), 0);

        assert_eq!(history.redo(), Some(&doc(1)));
        assert_eq!(history.redo(), Some(&doc(2)));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_commit_discards_redo_buffer() {
        let mut history = History::new(doc(0), 50);
        history.commit("a", doc(1));
        history.commit("b", doc(2));
        history.undo();

        history.commit("c", doc(3));
        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.current().snapshot, doc(3));
    }

    #[test]
    fn test_depth_bound_drops_oldest() {
        let mut history = History::new(doc(0), 3);
        for i in 1..=5 {
            history.commit("step", doc(i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.pointer(), 2);
        assert_eq!(history.entries()[0].snapshot, doc(3));

        assert!(history.undo().is_some());
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
        assert_eq!(history.current().snapshot, doc(3));
    }

    #[test]
    fn test_entries_have_distinct_ids() {
        let mut history = History::new(doc(0), 10);
        let first = history.current().id;
        let second = history.commit("x", doc(1)).id;
        assert_ne!(first, second);
        assert_eq!(history.current().label, "x");
    }
}
