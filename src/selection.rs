use std::collections::BTreeSet;

/// Current selection. Node and edge selection exclude each other; only
/// nodes can be multi-selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Nodes(BTreeSet<String>),
    Edge(String),
}

impl Selection {
    pub fn node(id: impl Into<String>) -> Self {
        Selection::Nodes(BTreeSet::from([id.into()]))
    }

    /// An empty id set collapses to `Empty`
    pub fn nodes<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            Selection::Empty
        } else {
            Selection::Nodes(ids)
        }
    }

    pub fn edge(id: impl Into<String>) -> Self {
        Selection::Edge(id.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        let ids = match self {
            Selection::Nodes(ids) => Some(ids.iter().map(String::as_str)),
            _ => None,
        };
        ids.into_iter().flatten()
    }

    pub fn node_count(&self) -> usize {
        match self {
            Selection::Nodes(ids) => ids.len(),
            _ => 0,
        }
    }

    pub fn contains_node(&self, id: &str) -> bool {
        matches!(self, Selection::Nodes(ids) if ids.contains(id))
    }

    /// The node shown in the property panel: only set for a single-node selection
    pub fn single_node(&self) -> Option<&str> {
        match self {
            Selection::Nodes(ids) if ids.len() == 1 => ids.iter().next().map(String::as_str),
            _ => None,
        }
    }

    pub fn edge_id(&self) -> Option<&str> {
        match self {
            Selection::Edge(id) => Some(id),
            _ => None,
        }
    }

    /// Drop ids the predicates no longer recognise. Returns true if anything was dropped.
    pub(crate) fn retain(
        &mut self,
        node_exists: impl Fn(&str) -> bool,
        edge_exists: impl Fn(&str) -> bool,
    ) -> bool {
        match self {
            Selection::Empty => false,
            Selection::Nodes(ids) => {
                let before = ids.len();
                ids.retain(|id| node_exists(id.as_str()));
                let changed = ids.len() != before;
                if ids.is_empty() {
                    *self = Selection::Empty;
                }
                changed
            }
            Selection::Edge(id) => {
                if edge_exists(id.as_str()) {
                    return false;
                }
                *self = Selection::Empty;
                true
            }
        }
    }
}
