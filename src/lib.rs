// Flow Diagram Editor - Core Library

pub mod config;
pub mod edge;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod id_generator;
pub mod input;
pub mod node;
pub mod palette;
pub mod selection;
pub mod serialization;
pub mod starter;
pub mod store;
pub mod table;
pub mod validation;

// Re-export main types for convenience
pub use config::{ConfigError, EditorConfig};
pub use edge::{Connection, Edge, EdgePatch, EdgeType};
pub use editor::{DiagramObserver, Editor};
pub use error::{ImportError, ImportErrorKind};
pub use event::{DiagramEvent, EventType};
pub use geometry::{
    align_selection_horizontally, align_selection_vertically, compute_alignment_guides,
    snap_to_guides, AlignAxis, AlignmentGuides, Position, Rectangle, Size,
};
pub use gesture::{DragCoalescer, PendingCommit};
pub use history::{History, HistoryEntry};
pub use id_generator::IdGenerator;
pub use input::{InputEvent, Key, ModifierState, Modifiers, ShortcutCommand};
pub use node::{
    DataPatch, DecisionData, DecisionPatch, GroupData, GroupPatch, Node, NodeKind, NodePatch,
    NodeType, NoteData, NotePatch, ProcessData, ProcessPatch, Section, Style,
};
pub use palette::{PaletteCategory, PaletteTemplate};
pub use selection::Selection;
pub use serialization::{
    export_document, export_document_pretty, format_document_text, import_document,
    load_document, save_document, Document, DocumentStats,
};
pub use store::DiagramStore;
pub use table::SpecificationRow;
pub use validation::{
    ValidatedDiagram, ValidationIssue, ValidationIssueType, ValidationResult, ValidationSeverity,
    Validator,
};
