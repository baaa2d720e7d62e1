use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A diagram change with timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramEvent {
    pub timestamp: DateTime<Utc>,
    pub event: EventType,
}

impl DiagramEvent {
    /// Create a new event with the current timestamp
    pub fn new(event: EventType) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Types of changes collaborators are told about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    NodeAdded { id: String },

    NodeUpdated { id: String },

    /// Drag moves are reported separately so views can skip re-layout work
    NodeMoved { id: String },

    NodeRemoved { id: String },

    EdgeAdded { id: String },

    EdgeUpdated { id: String },

    EdgeRemoved { id: String },

    SelectionChanged,

    /// The whole state was swapped (import, undo, redo)
    StateReplaced { nodes: usize, edges: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = DiagramEvent::new(EventType::NodeAdded {
            id: "node-1".to_string(),
        });

        assert!(event.timestamp <= Utc::now());
        assert_eq!(
            event.event,
            EventType::NodeAdded {
                id: "node-1".to_string()
            }
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = DiagramEvent::new(EventType::StateReplaced { nodes: 3, edges: 2 });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: DiagramEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.event, event.event);
    }
}
