use crate::{Edge, ImportError, Node};
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// The persisted/exchanged unit: every node and edge, nothing else
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Document {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn stats(&self, text: &str) -> DocumentStats {
        DocumentStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            characters: text.chars().count(),
        }
    }
}

/// Counters shown above the JSON editor panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub nodes: usize,
    pub edges: usize,
    pub characters: usize,
}

// ========== Export ==========

/// Serialize nodes and edges to compact document text
pub fn export_document(nodes: &[Node], edges: &[Edge]) -> serde_json::Result<String> {
    serde_json::to_string(&DocumentView { nodes, edges })
}

/// Serialize nodes and edges to two-space indented document text
pub fn export_document_pretty(nodes: &[Node], edges: &[Edge]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DocumentView { nodes, edges })
}

#[derive(Serialize)]
struct DocumentView<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
}

// ========== Import ==========

/// Parse document text.
///
/// Only the outer shape is checked: `nodes` and `edges` must be arrays and
/// each element must decode as a node or edge. Dangling endpoints and
/// duplicate ids are accepted. Unknown fields are ignored.
pub fn import_document(text: &str) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        warn!("Rejected import: {}", e);
        ImportError::malformed(e.to_string())
    })?;

    let document = document_from_value(value).map_err(|e| {
        warn!("Rejected import: {}", e);
        e
    })?;

    debug!(
        "Parsed document with {} nodes and {} edges",
        document.nodes.len(),
        document.edges.len()
    );
    Ok(document)
}

fn document_from_value(value: Value) -> Result<Document, ImportError> {
    let Value::Object(mut root) = value else {
        return Err(ImportError::invalid_shape("document must be an object"));
    };

    let nodes = match root.remove("nodes") {
        Some(Value::Array(items)) => items,
        _ => return Err(ImportError::invalid_shape("\"nodes\" must be an array")),
    };
    let edges = match root.remove("edges") {
        Some(Value::Array(items)) => items,
        _ => return Err(ImportError::invalid_shape("\"edges\" must be an array")),
    };

    let nodes = nodes
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Node>(item)
                .map_err(|e| ImportError::invalid_shape(format!("nodes[{}]: {}", index, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let edges = edges
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Edge>(item)
                .map_err(|e| ImportError::invalid_shape(format!("edges[{}]: {}", index, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Document { nodes, edges })
}

/// Re-indent arbitrary JSON text the way exports are written
pub fn format_document_text(text: &str) -> Result<String, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::malformed(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| ImportError::malformed(e.to_string()))
}

// ========== Files ==========

/// Write a document as indented JSON
pub fn save_document(path: &Path, document: &Document) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create document file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| format!("Failed to write document to: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush document file: {}", path.display()))?;
    Ok(())
}

/// Read and import a document file
pub fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document file: {}", path.display()))?;
    import_document(&text)
        .with_context(|| format!("Failed to import document from: {}", path.display()))
}
