use crate::{DiagramStore, Edge, Node};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Info,    // worth knowing, nothing wrong
    Warning, // renders, but not as intended
    Error,   // part of the diagram cannot render
}

/// Validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
    /// Node or edge ids
    pub affected: Vec<String>,
    pub issue_type: ValidationIssueType,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    DanglingEdge,
    DuplicateNodeId,
    DuplicateEdgeId,
    BrokenParent,
    ParentNotGroup,
    SelfLoop,
}

/// Complete validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty validation result
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Warning)
    }

    fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Error)
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Warning)
    }

    pub fn info(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Info)
    }

    /// No errors (warnings and info are allowed)
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// Diagnostics for a diagram. Never run on import; purely advisory.
pub struct Validator;

impl Validator {
    /// Run all checks
    pub fn validate(nodes: &[Node], edges: &[Edge]) -> ValidationResult {
        let mut result = ValidationResult::new();

        for id in Self::duplicates(nodes.iter().map(|n| n.id.as_str())) {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Error,
                message: format!("Node id \"{}\" is used more than once", id),
                affected: vec![id],
                issue_type: ValidationIssueType::DuplicateNodeId,
            });
        }

        for id in Self::duplicates(edges.iter().map(|e| e.id.as_str())) {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Error,
                message: format!("Edge id \"{}\" is used more than once", id),
                affected: vec![id],
                issue_type: ValidationIssueType::DuplicateEdgeId,
            });
        }

        let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        for edge in edges {
            let missing: Vec<&str> = [edge.source.as_str(), edge.target.as_str()]
                .into_iter()
                .filter(|id| !by_id.contains_key(id))
                .collect();

            if !missing.is_empty() {
                result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Error,
                    message: format!(
                        "Edge {} points at missing node(s): {}",
                        edge.id,
                        missing.join(", ")
                    ),
                    affected: vec![edge.id.clone()],
                    issue_type: ValidationIssueType::DanglingEdge,
                });
            } else if edge.is_self_loop() {
                result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Info,
                    message: format!("Edge {} loops back to {}", edge.id, edge.source),
                    affected: vec![edge.id.clone(), edge.source.clone()],
                    issue_type: ValidationIssueType::SelfLoop,
                });
            }
        }

        for node in nodes {
            let Some(parent_id) = node.parent_id.as_deref() else {
                continue;
            };

            match by_id.get(parent_id) {
                None => result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Warning,
                    message: format!(
                        "Node {} belongs to missing group {}; it renders unparented",
                        node.id, parent_id
                    ),
                    affected: vec![node.id.clone()],
                    issue_type: ValidationIssueType::BrokenParent,
                }),
                Some(parent) if !parent.is_group() => result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Warning,
                    message: format!(
                        "Node {} has parent {}, which is a {} node, not a group",
                        node.id,
                        parent_id,
                        parent.node_type()
                    ),
                    affected: vec![node.id.clone(), parent_id.to_string()],
                    issue_type: ValidationIssueType::ParentNotGroup,
                }),
                Some(_) => {}
            }
        }

        result
    }

    /// Ids seen more than once, in first-repeat order
    fn duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for id in ids {
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id.to_string());
            }
        }

        duplicates
    }
}

/// Extension trait for the store to add validation
pub trait ValidatedDiagram {
    fn validate(&self) -> ValidationResult;

    /// Highest severity per affected node or edge id
    fn elements_with_issues(&self, result: &ValidationResult) -> HashMap<String, ValidationSeverity>;
}

impl ValidatedDiagram for DiagramStore {
    fn validate(&self) -> ValidationResult {
        Validator::validate(self.nodes(), self.edges())
    }

    fn elements_with_issues(&self, result: &ValidationResult) -> HashMap<String, ValidationSeverity> {
        let mut elements: HashMap<String, ValidationSeverity> = HashMap::new();

        for issue in &result.issues {
            for id in &issue.affected {
                elements
                    .entry(id.clone())
                    .and_modify(|severity| *severity = (*severity).max(issue.severity))
                    .or_insert(issue.severity);
            }
        }

        elements
    }
}
