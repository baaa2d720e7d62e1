use crate::geometry::{align_centers, AlignAxis};
use crate::{
    Connection, DiagramEvent, Document, Edge, EdgePatch, EditorConfig, EventType, IdGenerator,
    Node, NodeKind, NodePatch, NodeType, Position, Selection, Size,
};
use log::debug;
use serde_json::{json, Map};
use std::collections::BTreeSet;

/// Offset between consecutive default placements, so palette nodes don't stack exactly
const PLACEMENT_STEP: f64 = 24.0;
const PLACEMENT_CYCLE: usize = 8;

/// Canonical owner of the diagram's nodes, edges and selection
#[derive(Debug, Clone)]
pub struct DiagramStore {
    /// Nodes in insertion order (also render order)
    nodes: Vec<Node>,

    edges: Vec<Edge>,

    selection: Selection,

    node_ids: IdGenerator,
    edge_ids: IdGenerator,

    /// Changes not yet handed to observers
    events: Vec<DiagramEvent>,

    config: EditorConfig,

    /// Number of nodes placed without an explicit position
    placements: usize,
}

impl Default for DiagramStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramStore {
    /// Create an empty store with default settings
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            selection: Selection::Empty,
            node_ids: IdGenerator::for_nodes(),
            edge_ids: IdGenerator::for_edges(),
            events: Vec::new(),
            config,
            placements: 0,
        }
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges touching a node, in either direction
    pub fn edges_of<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.involves(node_id))
    }

    /// Nodes whose `parent_id` points at the given node
    pub fn children_of<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .iter()
            .filter(move |node| node.parent_id.as_deref() == Some(parent_id))
    }

    /// The currently selected nodes, in diagram order
    pub fn selected_nodes(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|node| self.selection.contains_node(&node.id))
            .collect()
    }

    // ========== Node operations ==========

    /// Create a node with a fresh id.
    ///
    /// Without a position the node lands near the configured default spot,
    /// shifted a little for each such placement. Groups get the default group
    /// footprint and sit behind other nodes; everything else is auto-sized.
    pub fn add_node(&mut self, kind: NodeKind, position: Option<Position>) -> Node {
        let nodes = &self.nodes;
        let id = self
            .node_ids
            .next(|candidate| nodes.iter().any(|node| node.id == candidate));

        let position = position.unwrap_or_else(|| self.next_default_position());
        let mut node = Node::new(id, kind, position);

        if node.node_type() == NodeType::Group {
            node.size = Some(self.config.group_default_size);
            let mut style = Map::new();
            style.insert("zIndex".to_string(), json!(-1));
            node.style = Some(style);
        }

        debug!("Added {} node {}", node.node_type(), node.id);
        self.log_event(EventType::NodeAdded {
            id: node.id.clone(),
        });
        self.nodes.push(node.clone());
        node
    }

    fn next_default_position(&mut self) -> Position {
        let step = (self.placements % PLACEMENT_CYCLE) as f64 * PLACEMENT_STEP;
        self.placements += 1;
        self.config.default_node_position.offset(step, step)
    }

    /// Merge a partial update into a node.
    ///
    /// Unknown ids, data patches for another node type and patches that
    /// change nothing are ignored.
    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let moved_only = patch.data.is_none()
            && patch.size.is_none()
            && patch.style.is_none()
            && patch.draggable.is_none()
            && patch.parent_id.is_none();

        let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
            debug!("Ignoring update for missing node {}", id);
            return false;
        };

        if !node.apply(patch) {
            debug!("Update left {} node {} unchanged", node.node_type(), id);
            return false;
        }

        let id = id.to_string();
        self.log_event(if moved_only {
            EventType::NodeMoved { id }
        } else {
            EventType::NodeUpdated { id }
        });
        true
    }

    pub fn set_node_position(&mut self, id: &str, position: Position) -> bool {
        self.update_node(id, NodePatch::position(position))
    }

    /// Resize a node (explicit size replaces auto-sizing)
    pub fn set_node_size(&mut self, id: &str, size: Size) -> bool {
        self.update_node(id, NodePatch::size(size))
    }

    /// Delete one node and every edge touching it
    pub fn delete_node(&mut self, id: &str) -> bool {
        self.delete_nodes([id])
    }

    /// Delete a batch of nodes with their edges.
    ///
    /// Children of deleted groups are either detached or, with
    /// `cascade_group_delete`, deleted too. The selection is pruned.
    pub fn delete_nodes<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> bool {
        let mut doomed: BTreeSet<String> = ids
            .into_iter()
            .filter(|id| self.node(id).is_some())
            .map(str::to_string)
            .collect();

        if doomed.is_empty() {
            debug!("Ignoring delete for missing nodes");
            return false;
        }

        if self.config.cascade_group_delete {
            self.collect_descendants(&mut doomed);
        }

        let mut removed_edges = Vec::new();
        self.edges.retain(|edge| {
            let keep = !doomed.contains(&edge.source) && !doomed.contains(&edge.target);
            if !keep {
                removed_edges.push(edge.id.clone());
            }
            keep
        });

        self.nodes.retain(|node| !doomed.contains(&node.id));

        let mut detached = Vec::new();
        for node in &mut self.nodes {
            if node.parent_id.as_ref().is_some_and(|parent| doomed.contains(parent)) {
                node.parent_id = None;
                detached.push(node.id.clone());
            }
        }

        debug!(
            "Deleted {} nodes, {} edges, detached {} children",
            doomed.len(),
            removed_edges.len(),
            detached.len()
        );

        for id in removed_edges {
            self.log_event(EventType::EdgeRemoved { id });
        }
        for id in doomed {
            self.log_event(EventType::NodeRemoved { id });
        }
        for id in detached {
            self.log_event(EventType::NodeUpdated { id });
        }

        self.prune_selection();
        true
    }

    /// Grow the set with every node nested (at any depth) under a node already in it
    fn collect_descendants(&self, doomed: &mut BTreeSet<String>) {
        loop {
            let children: Vec<String> = self
                .nodes
                .iter()
                .filter(|node| !doomed.contains(&node.id))
                .filter(|node| node.parent_id.as_ref().is_some_and(|parent| doomed.contains(parent)))
                .map(|node| node.id.clone())
                .collect();

            if children.is_empty() {
                break;
            }
            doomed.extend(children);
        }
    }

    // ========== Edge operations ==========

    /// Create an edge for a connection gesture.
    ///
    /// New edges are animated. Returns `None` only when the configuration
    /// forbids self loops or duplicate connections.
    pub fn connect(&mut self, connection: Connection) -> Option<Edge> {
        if connection.source == connection.target && !self.config.allow_self_loops {
            debug!("Refusing self loop on {}", connection.source);
            return None;
        }

        if self.config.reject_duplicate_edges
            && self.edges.iter().any(|edge| edge.connects_same_as(&connection))
        {
            debug!(
                "Refusing duplicate edge {} -> {}",
                connection.source, connection.target
            );
            return None;
        }

        let edges = &self.edges;
        let id = self
            .edge_ids
            .next(|candidate| edges.iter().any(|edge| edge.id == candidate));

        let mut edge = Edge::new(id, connection.source, connection.target).animated(true);
        edge.source_handle = connection.source_handle;
        edge.target_handle = connection.target_handle;

        debug!("Connected {} -> {} as {}", edge.source, edge.target, edge.id);
        self.log_event(EventType::EdgeAdded {
            id: edge.id.clone(),
        });
        self.edges.push(edge.clone());
        Some(edge)
    }

    /// Merge a partial update into an edge; unknown ids are ignored
    pub fn update_edge(&mut self, id: &str, patch: EdgePatch) -> bool {
        let Some(edge) = self.edges.iter_mut().find(|edge| edge.id == id) else {
            debug!("Ignoring update for missing edge {}", id);
            return false;
        };

        if !edge.apply(patch) {
            return false;
        }

        self.log_event(EventType::EdgeUpdated { id: id.to_string() });
        true
    }

    pub fn delete_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|edge| edge.id != id);

        if self.edges.len() == before {
            debug!("Ignoring delete for missing edge {}", id);
            return false;
        }

        self.log_event(EventType::EdgeRemoved { id: id.to_string() });
        self.prune_selection();
        true
    }

    // ========== Selection ==========

    /// Replace the selection. Ids that don't exist are dropped.
    pub fn select(&mut self, selection: Selection) -> bool {
        let mut selection = selection;
        let nodes = &self.nodes;
        let edges = &self.edges;
        selection.retain(
            |id| nodes.iter().any(|node| node.id == id),
            |id| edges.iter().any(|edge| edge.id == id),
        );

        if selection == self.selection {
            return false;
        }

        self.selection = selection;
        self.log_event(EventType::SelectionChanged);
        true
    }

    pub fn select_all_nodes(&mut self) -> bool {
        let all = Selection::nodes(self.nodes.iter().map(|node| node.id.clone()));
        self.select(all)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.select(Selection::Empty)
    }

    /// Delete whatever is selected: a node set or a single edge
    pub fn delete_selection(&mut self) -> bool {
        match self.selection.clone() {
            Selection::Empty => false,
            Selection::Nodes(ids) => self.delete_nodes(ids.iter().map(String::as_str)),
            Selection::Edge(id) => self.delete_edge(&id),
        }
    }

    fn prune_selection(&mut self) {
        let nodes = &self.nodes;
        let edges = &self.edges;
        let changed = self.selection.retain(
            |id| nodes.iter().any(|node| node.id == id),
            |id| edges.iter().any(|edge| edge.id == id),
        );
        if changed {
            self.log_event(EventType::SelectionChanged);
        }
    }

    // ========== Alignment ==========

    /// Put every selected node's center on the mean center along one axis.
    ///
    /// Needs at least two selected nodes.
    pub fn align_selection(&mut self, axis: AlignAxis) -> bool {
        let targets = align_centers(&self.selected_nodes(), axis);
        if targets.is_empty() {
            return false;
        }

        let mut moved = Vec::new();
        for node in &mut self.nodes {
            let Some(&coordinate) = targets.get(&node.id) else {
                continue;
            };
            let slot = match axis {
                AlignAxis::Horizontal => &mut node.position.y,
                AlignAxis::Vertical => &mut node.position.x,
            };
            if *slot != coordinate {
                *slot = coordinate;
                moved.push(node.id.clone());
            }
        }

        debug!("Aligned {} nodes {:?}", targets.len(), axis);
        for id in moved {
            self.log_event(EventType::NodeMoved { id });
        }
        true
    }

    // ========== Whole-state operations ==========

    /// Copy of the current nodes and edges
    pub fn snapshot(&self) -> Document {
        Document::new(self.nodes.clone(), self.edges.clone())
    }

    /// Swap in a snapshot (undo/redo). Selection entries that no longer exist are dropped.
    pub fn restore(&mut self, document: Document) {
        self.install(document);
        self.prune_selection();
    }

    /// Replace the whole state (import). The selection is cleared.
    pub fn replace(&mut self, document: Document) {
        self.install(document);
        if !self.selection.is_empty() {
            self.selection = Selection::Empty;
            self.log_event(EventType::SelectionChanged);
        }
    }

    fn install(&mut self, document: Document) {
        self.nodes = document.nodes;
        self.edges = document.edges;

        self.node_ids
            .reseed(self.nodes.iter().map(|node| node.id.as_str()));
        self.edge_ids
            .reseed(self.edges.iter().map(|edge| edge.id.as_str()));

        self.log_event(EventType::StateReplaced {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
        });
    }

    // ========== Events ==========

    fn log_event(&mut self, event: EventType) {
        self.events.push(DiagramEvent::new(event));
    }

    /// Changes recorded since the last drain
    pub fn pending_events(&self) -> &[DiagramEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<DiagramEvent> {
        std::mem::take(&mut self.events)
    }
}
