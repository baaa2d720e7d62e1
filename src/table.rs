use crate::{Node, NodeKind, Section};

/// One row of the specification table: a process step with audit or billing details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationRow {
    pub node_id: String,
    pub label: String,
    pub section: Section,
    pub description: Option<String>,
    pub audit_log: Option<String>,
    pub audit_status: Option<String>,
    pub billing: Option<String>,
}

impl SpecificationRow {
    /// Billing column text with its icon, as the table shows it
    pub fn billing_text(&self, icon: Option<&str>) -> Option<String> {
        let billing = self.billing.as_deref()?;
        Some(match icon {
            Some(icon) => format!("{} {}", icon, billing),
            None => billing.to_string(),
        })
    }
}

/// Derive table rows from the diagram, in node order.
///
/// Only process nodes carrying an audit log, audit status or billing note
/// produce a row.
pub fn specification_rows(nodes: &[Node]) -> Vec<SpecificationRow> {
    nodes
        .iter()
        .filter_map(|node| {
            let NodeKind::Process(data) = &node.kind else {
                return None;
            };
            if data.audit_log.is_none() && data.audit_status.is_none() && data.billing.is_none() {
                return None;
            }

            Some(SpecificationRow {
                node_id: node.id.clone(),
                label: data.label.clone(),
                section: data.section.clone(),
                description: data.description.clone(),
                audit_log: data.audit_log.clone(),
                audit_status: data.audit_status.clone(),
                billing: data.billing.clone(),
            })
        })
        .collect()
}
