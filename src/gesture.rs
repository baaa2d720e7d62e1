use chrono::{DateTime, Duration, Utc};

/// A settled drag waiting out its quiet period
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pub label: String,
    pub deadline: DateTime<Utc>,
}

/// Two-phase drag protocol: moves between `begin` and `end` never reach
/// history; `end` schedules one commit, and a later `end` inside the quiet
/// period replaces it.
#[derive(Debug, Clone, Default)]
pub struct DragCoalescer {
    /// Node being dragged right now
    active: Option<String>,

    pending: Option<PendingCommit>,
}

impl DragCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture. No history entry.
    pub fn begin(&mut self, node_id: impl Into<String>) {
        self.active = Some(node_id.into());
    }

    /// Abandon the gesture in progress; a pending commit is kept
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Finish the gesture and schedule its commit, replacing any pending one
    pub fn end(&mut self, label: impl Into<String>, now: DateTime<Utc>, delay: Duration) {
        self.active = None;
        self.pending = Some(PendingCommit {
            label: label.into(),
            deadline: now + delay,
        });
    }

    pub fn pending(&self) -> Option<&PendingCommit> {
        self.pending.as_ref()
    }

    /// True once the quiet period has passed
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline)
    }

    /// Take the pending commit if its deadline has passed
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Option<PendingCommit> {
        if self.is_due(now) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Take the pending commit regardless of its deadline
    pub fn take_pending(&mut self) -> Option<PendingCommit> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    #[test]
    fn test_commit_waits_for_deadline() {
        let mut drag = DragCoalescer::new();
        drag.begin("node-1");
        assert!(drag.is_dragging());

        drag.end("Move node-1", at(0), Duration::milliseconds(300));
        assert!(!drag.is_dragging());
        assert!(drag.take_due(at(299)).is_none());

        let pending = drag.take_due(at(300)).unwrap();
        assert_eq!(pending.label, "Move node-1");
        assert!(drag.pending().is_none());
    }

    #[test]
    fn test_second_end_replaces_pending() {
        let mut drag = DragCoalescer::new();
        drag.begin("node-1");
        drag.end("Move node-1", at(0), Duration::milliseconds(300));
        drag.begin("node-2");
        drag.end("Move node-2", at(200), Duration::milliseconds(300));

        assert!(drag.take_due(at(300)).is_none());
        let pending = drag.take_due(at(500)).unwrap();
        assert_eq!(pending.label, "Move node-2");
        assert!(drag.take_due(at(10_000)).is_none());
    }

    #[test]
    fn test_take_pending_ignores_deadline() {
        let mut drag = DragCoalescer::new();
        drag.end("Move", at(0), Duration::milliseconds(300));
        assert!(drag.take_pending().is_some());
        assert!(drag.take_pending().is_none());
    }
}
