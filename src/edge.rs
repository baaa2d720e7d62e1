use crate::node::Style;
use serde::{Deserialize, Serialize};

/// Directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,

    /// Node the flow starts FROM
    pub source: String,

    /// Node the flow goes TO
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// In-progress / asynchronous flow when true, synchronous or complete when false
    #[serde(default)]
    pub animated: bool,

    #[serde(rename = "type", default)]
    pub edge_type: EdgeType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Edge {
    /// Create a plain edge
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            label: None,
            animated: false,
            edge_type: EdgeType::Default,
            style: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Check if this edge touches a given node
    pub fn involves(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Same endpoints and handles
    pub fn connects_same_as(&self, connection: &Connection) -> bool {
        self.source == connection.source
            && self.target == connection.target
            && self.source_handle == connection.source_handle
            && self.target_handle == connection.target_handle
    }

    /// Merge a partial update; returns true if anything changed
    pub fn apply(&mut self, patch: EdgePatch) -> bool {
        let before = self.clone();

        if let Some(label) = patch.label {
            self.label = if label.is_empty() { None } else { Some(label) };
        }
        if let Some(animated) = patch.animated {
            self.animated = animated;
        }
        if let Some(edge_type) = patch.edge_type {
            self.edge_type = edge_type;
        }
        if let Some(style) = patch.style {
            self.style = Some(style);
        }

        *self != before
    }
}

/// Routing style of an edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    #[default]
    Default,
    Straight,
    Step,
    #[serde(rename = "smoothstep")]
    SmoothStep,
}

/// A connection gesture coming from the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(
        mut self,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Self {
        self.source_handle = source_handle;
        self.target_handle = target_handle;
        self
    }
}

/// Partial update for an edge; an empty label clears it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePatch {
    pub label: Option<String>,
    pub animated: Option<bool>,
    pub edge_type: Option<EdgeType>,
    pub style: Option<Style>,
}
