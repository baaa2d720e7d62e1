use crate::{Position, Rectangle, Size};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Free-form visual attributes (stroke, colors, z-index). Carried through
/// untouched; nothing in the core reads it except for legacy size hints.
pub type Style = Map<String, Value>;

/// A placed diagram element
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "NodeRecord")]
pub struct Node {
    /// Unique within a diagram, never changes
    pub id: String,

    /// Type-specific payload; its variant is the node's type
    pub kind: NodeKind,

    /// Top-left corner in absolute diagram coordinates
    pub position: Position,

    /// Explicit or measured size; `None` means auto-sized
    pub size: Option<Size>,

    pub style: Option<Style>,

    /// Visual containment only
    pub parent_id: Option<String>,

    /// `Some(false)` for locked groups
    pub draggable: Option<bool>,
}

impl Node {
    /// Create an auto-sized node
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            size: None,
            style: None,
            parent_id: None,
            draggable: None,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn label(&self) -> &str {
        self.kind.label()
    }

    pub fn is_group(&self) -> bool {
        self.node_type() == NodeType::Group
    }

    /// Size used for geometry. Falls back to `style.width`/`style.height`,
    /// where older documents keep group footprints; otherwise zero-sized.
    pub fn effective_size(&self) -> Size {
        self.size
            .or_else(|| self.style.as_ref().and_then(size_from_style))
            .unwrap_or_default()
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_parts(self.position, self.effective_size())
    }

    /// Apply a partial update. Returns false if nothing changed, including
    /// when the data patch targets a different node type.
    pub fn apply(&mut self, patch: NodePatch) -> bool {
        if let Some(data) = &patch.data {
            if data.node_type() != self.node_type() {
                return false;
            }
        }

        let before = self.clone();

        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = Some(size);
        }
        if let Some(style) = patch.style {
            self.style = Some(style);
        }
        if let Some(draggable) = patch.draggable {
            self.draggable = Some(draggable);
        }
        if let Some(parent_id) = patch.parent_id {
            self.parent_id = parent_id;
        }

        if let Some(data) = patch.data {
            let lock_change = self.kind.merge(data);
            if let Some(locked) = lock_change {
                self.draggable = Some(!locked);
            }
        }

        *self != before
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeView::from(self).serialize(serializer)
    }
}

/// Closed set of node types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Process,
    Decision,
    Note,
    Group,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Process => "process",
            NodeType::Decision => "decision",
            NodeType::Note => "note",
            NodeType::Group => "group",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node payload keyed by type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeKind {
    Process(ProcessData),
    Decision(DecisionData),
    Note(NoteData),
    Group(GroupData),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Process(_) => NodeType::Process,
            NodeKind::Decision(_) => NodeType::Decision,
            NodeKind::Note(_) => NodeType::Note,
            NodeKind::Group(_) => NodeType::Group,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeKind::Process(data) => &data.label,
            NodeKind::Decision(data) => &data.label,
            NodeKind::Note(data) => &data.label,
            NodeKind::Group(data) => &data.label,
        }
    }

    /// Decode the `data` object of a document node for the given type
    pub fn from_value(node_type: NodeType, data: Value) -> Result<Self, serde_json::Error> {
        let data = match data {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        Ok(match node_type {
            NodeType::Process => NodeKind::Process(serde_json::from_value(data)?),
            NodeType::Decision => NodeKind::Decision(serde_json::from_value(data)?),
            NodeType::Note => NodeKind::Note(serde_json::from_value(data)?),
            NodeType::Group => NodeKind::Group(serde_json::from_value(data)?),
        })
    }

    /// Merge a same-typed patch. Returns the new lock state when a group's
    /// `locked` flag was part of the patch.
    fn merge(&mut self, patch: DataPatch) -> Option<bool> {
        match (self, patch) {
            (NodeKind::Process(data), DataPatch::Process(patch)) => {
                data.merge(patch);
                None
            }
            (NodeKind::Decision(data), DataPatch::Decision(patch)) => {
                data.merge(patch);
                None
            }
            (NodeKind::Note(data), DataPatch::Note(patch)) => {
                data.merge(patch);
                None
            }
            (NodeKind::Group(data), DataPatch::Group(patch)) => data.merge(patch),
            _ => None,
        }
    }
}

/// Lane a process step belongs to. The first four values are current; the
/// rest come from older diagrams and are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Section {
    UserAction,
    #[default]
    BusinessLogic,
    BillingLogic,
    Error,
    Console,
    ApiDirect,
    NextPlatform,
    BillingPlatform,
    OpenStack,
    Fail,
    /// Unrecognised value, kept verbatim
    Other(String),
}

impl Section {
    pub fn as_str(&self) -> &str {
        match self {
            Section::UserAction => "user-action",
            Section::BusinessLogic => "business-logic",
            Section::BillingLogic => "billing-logic",
            Section::Error => "error",
            Section::Console => "console",
            Section::ApiDirect => "api-direct",
            Section::NextPlatform => "next-platform",
            Section::BillingPlatform => "billing-platform",
            Section::OpenStack => "openstack",
            Section::Fail => "fail",
            Section::Other(value) => value,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            Section::Console
                | Section::ApiDirect
                | Section::NextPlatform
                | Section::BillingPlatform
                | Section::OpenStack
                | Section::Fail
        )
    }

    /// True for the failure lanes of either value set
    pub fn is_failure(&self) -> bool {
        matches!(self, Section::Error | Section::Fail)
    }
}

impl From<String> for Section {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user-action" => Section::UserAction,
            "business-logic" => Section::BusinessLogic,
            "billing-logic" => Section::BillingLogic,
            "error" => Section::Error,
            "console" => Section::Console,
            "api-direct" => Section::ApiDirect,
            "next-platform" => Section::NextPlatform,
            "billing-platform" => Section::BillingPlatform,
            "openstack" => Section::OpenStack,
            "fail" => Section::Fail,
            _ => Section::Other(value),
        }
    }
}

impl From<Section> for String {
    fn from(section: Section) -> Self {
        section.as_str().to_string()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessData {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ProcessData {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn in_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    fn merge(&mut self, patch: ProcessPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(section) = patch.section {
            self.section = section;
        }
        merge_text(&mut self.icon, patch.icon);
        merge_text(&mut self.description, patch.description);
        merge_text(&mut self.status, patch.status);
        merge_text(&mut self.audit_log, patch.audit_log);
        merge_text(&mut self.audit_status, patch.audit_status);
        merge_text(&mut self.billing, patch.billing);
        merge_text(&mut self.billing_icon, patch.billing_icon);
        merge_text(&mut self.note, patch.note);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionData {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yes_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_label: Option<String>,
}

impl DecisionData {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    fn merge(&mut self, patch: DecisionPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        merge_text(&mut self.description, patch.description);
        merge_text(&mut self.yes_label, patch.yes_label);
        merge_text(&mut self.no_label, patch.no_label);
    }
}

/// Sticky note. Older diagrams put the body in `description`, newer ones in `content`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteData {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl NoteData {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// The note body, whichever field holds it
    pub fn body(&self) -> Option<&str> {
        self.content.as_deref().or(self.description.as_deref())
    }

    fn merge(&mut self, patch: NotePatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        merge_text(&mut self.content, patch.content);
        merge_text(&mut self.description, patch.description);
        merge_text(&mut self.emoji, patch.emoji);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupData {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
}

impl GroupData {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    fn merge(&mut self, patch: GroupPatch) -> Option<bool> {
        if let Some(label) = patch.label {
            self.label = label;
        }
        merge_text(&mut self.color, patch.color);
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        patch.locked
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Text fields coming from the property panel: an empty string clears the field.
fn merge_text(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *slot = if value.is_empty() { None } else { Some(value) };
    }
}

// ========== Partial updates ==========

/// Partial update for a node. Every `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub style: Option<Style>,
    pub draggable: Option<bool>,
    /// `Some(None)` detaches the node from its group
    pub parent_id: Option<Option<String>>,
    pub data: Option<DataPatch>,
}

impl NodePatch {
    pub fn data(data: DataPatch) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Data patch keyed by node type; applying it to a node of another type is refused.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPatch {
    Process(ProcessPatch),
    Decision(DecisionPatch),
    Note(NotePatch),
    Group(GroupPatch),
}

impl DataPatch {
    pub fn node_type(&self) -> NodeType {
        match self {
            DataPatch::Process(_) => NodeType::Process,
            DataPatch::Decision(_) => NodeType::Decision,
            DataPatch::Note(_) => NodeType::Note,
            DataPatch::Group(_) => NodeType::Group,
        }
    }

    /// Relabel any node type
    pub fn label_for(node_type: NodeType, label: impl Into<String>) -> Self {
        let label = Some(label.into());
        match node_type {
            NodeType::Process => DataPatch::Process(ProcessPatch {
                label,
                ..ProcessPatch::default()
            }),
            NodeType::Decision => DataPatch::Decision(DecisionPatch {
                label,
                ..DecisionPatch::default()
            }),
            NodeType::Note => DataPatch::Note(NotePatch {
                label,
                ..NotePatch::default()
            }),
            NodeType::Group => DataPatch::Group(GroupPatch {
                label,
                ..GroupPatch::default()
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessPatch {
    pub label: Option<String>,
    pub section: Option<Section>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub audit_log: Option<String>,
    pub audit_status: Option<String>,
    pub billing: Option<String>,
    pub billing_icon: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionPatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub yes_label: Option<String>,
    pub no_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub label: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupPatch {
    pub label: Option<String>,
    pub color: Option<String>,
    pub locked: Option<bool>,
}

// ========== Document representation ==========

/// Node as it appears in a diagram document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    id: String,
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    style: Option<Style>,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    draggable: Option<bool>,
}

impl TryFrom<NodeRecord> for Node {
    type Error = String;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        if !matches!(record.data, Value::Object(_) | Value::Null) {
            return Err(format!("node {}: data must be an object", record.id));
        }

        let kind = NodeKind::from_value(record.node_type, record.data)
            .map_err(|e| format!("node {}: {}", record.id, e))?;

        let size = match (record.width, record.height) {
            (Some(width), Some(height)) => Some(Size::new(width, height)),
            _ => None,
        };

        Ok(Self {
            id: record.id,
            kind,
            position: record.position,
            size,
            style: record.style,
            parent_id: record.parent_id,
            draggable: record.draggable,
        })
    }
}

fn size_from_style(style: &Style) -> Option<Size> {
    let width = style.get("width")?.as_f64()?;
    let height = style.get("height")?.as_f64()?;
    Some(Size::new(width, height))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeView<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    node_type: NodeType,
    position: Position,
    data: &'a NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draggable: Option<bool>,
}

impl<'a> From<&'a Node> for NodeView<'a> {
    fn from(node: &'a Node) -> Self {
        Self {
            id: &node.id,
            node_type: node.node_type(),
            position: node.position,
            data: &node.kind,
            width: node.size.map(|s| s.width),
            height: node.size.map(|s| s.height),
            style: node.style.as_ref(),
            parent_id: node.parent_id.as_deref(),
            draggable: node.draggable,
        }
    }
}
