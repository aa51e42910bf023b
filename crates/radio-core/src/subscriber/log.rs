use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, RwLock},
};

use radio_model::{OperationId, OperationState, OperationType};

use super::{Subscribe, Transition};

/// In-memory record of every transition, keyed by operation.
///
/// Unbounded by default; [`OperationLog::with_retention`] caps how many resolved operations are kept.
#[derive(Clone, Default)]
pub struct OperationLog {
    inner: Arc<RwLock<OperationLogInner>>,
}

#[derive(Default)]
struct OperationLogInner {
    entries: HashMap<OperationId, Entry>,
    /// Insertion order of operations.
    order: VecDeque<OperationId>,
    /// Maximum number of resolved operations kept; `None` keeps everything.
    retention: Option<usize>,
}

impl OperationLogInner {
    /// Drop the oldest resolved operations beyond the retention cap. Unresolved ones are never evicted.
    fn evict(&mut self) {
        let Some(max) = self.retention else {
            return;
        };
        let resolved = self
            .order
            .iter()
            .filter(|id| self.entries.get(*id).is_some_and(Entry::is_resolved))
            .count();
        let mut excess = resolved.saturating_sub(max);
        if excess == 0 {
            return;
        }

        let entries = &mut self.entries;
        self.order.retain(|id| {
            if excess > 0 && entries.get(id).is_some_and(Entry::is_resolved) {
                entries.remove(id);
                excess -= 1;
                false
            } else {
                true
            }
        });
    }
}

struct Entry {
    op: OperationType,
    history: Vec<OperationState>,
    reason: Option<String>,
}

impl Entry {
    fn is_resolved(&self) -> bool {
        self.history.last().is_some_and(OperationState::is_terminal)
    }
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max` resolved operations, evicting the oldest first.
    pub fn with_retention(max: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(OperationLogInner {
                retention: Some(max),
                ..OperationLogInner::default()
            })),
        }
    }

    /// Forget one operation. Returns `false` if it was not recorded.
    pub fn remove(&self, id: &OperationId) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());
        if inner.entries.remove(id).is_none() {
            return false;
        }
        inner.order.retain(|other| other != id);
        true
    }

    /// Forget every operation.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());
        inner.entries.clear();
        inner.order.clear();
    }

    /// Current state of an operation.
    pub fn state(&self, id: &OperationId) -> Option<OperationState> {
        let inner = self.inner.read().unwrap_or_else(|p| p.into_inner());
        inner
            .entries
            .get(id)
            .and_then(|e| e.history.last().copied())
    }

    /// Every state the operation went through, starting with [`OperationState::Idle`].
    pub fn history(&self, id: &OperationId) -> Vec<OperationState> {
        let inner = self.inner.read().unwrap_or_else(|p| p.into_inner());
        inner
            .entries
            .get(id)
            .map(|e| e.history.clone())
            .unwrap_or_default()
    }

    /// Last failure reason recorded for the operation.
    pub fn reason(&self, id: &OperationId) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(|p| p.into_inner());
        inner.entries.get(id).and_then(|e| e.reason.clone())
    }

    /// Operations in submission order, optionally restricted to one kind.
    pub fn operations(&self, op: Option<OperationType>) -> Vec<OperationId> {
        let inner = self.inner.read().unwrap_or_else(|p| p.into_inner());
        inner
            .order
            .iter()
            .filter(|id| match op {
                Some(op) => inner.entries.get(*id).is_some_and(|e| e.op == op),
                None => true,
            })
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|p| p.into_inner()).order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Subscribe for OperationLog {
    fn on_transition(&self, t: &Transition) {
        let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());

        if !inner.entries.contains_key(&t.id) {
            inner.order.push_back(t.id);
        }
        let entry = inner.entries.entry(t.id).or_insert_with(|| Entry {
            op: t.op,
            history: vec![t.from],
            reason: None,
        });
        entry.history.push(t.to);
        if let Some(reason) = &t.reason {
            entry.reason = Some(reason.clone());
        }
        if t.to.is_terminal() {
            inner.evict();
        }
    }

    fn name(&self) -> &'static str {
        "operation-log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_model::Resolution;

    fn transition(id: OperationId, from: OperationState, to: OperationState) -> Transition {
        Transition {
            id,
            op: OperationType::ServiceDiscovery,
            from,
            to,
            reason: None,
        }
    }

    #[test]
    fn records_history_in_order() {
        let log = OperationLog::new();
        let id = OperationId::new();

        log.on_transition(&transition(id, OperationState::Idle, OperationState::Started));
        log.on_transition(&transition(
            id,
            OperationState::Started,
            OperationState::AwaitingResult,
        ));

        assert_eq!(
            log.history(&id),
            vec![
                OperationState::Idle,
                OperationState::Started,
                OperationState::AwaitingResult
            ]
        );
        assert_eq!(log.state(&id), Some(OperationState::AwaitingResult));
    }

    #[test]
    fn keeps_failure_reason() {
        let log = OperationLog::new();
        let id = OperationId::new();

        let mut t = transition(
            id,
            OperationState::RejectedStart,
            OperationState::Resolved(Resolution::Failure),
        );
        t.reason = Some("start rejected".into());
        log.on_transition(&t);

        assert_eq!(log.reason(&id).as_deref(), Some("start rejected"));
    }

    #[test]
    fn filters_operations_by_kind() {
        let log = OperationLog::new();
        let discovery = OperationId::new();
        let rssi = OperationId::new();

        log.on_transition(&transition(
            discovery,
            OperationState::Idle,
            OperationState::Started,
        ));
        let mut t = transition(rssi, OperationState::Idle, OperationState::Started);
        t.op = OperationType::ReadRssi;
        log.on_transition(&t);

        assert_eq!(log.len(), 2);
        assert_eq!(log.operations(None), vec![discovery, rssi]);
        assert_eq!(log.operations(Some(OperationType::ReadRssi)), vec![rssi]);
    }

    #[test]
    fn unknown_operation_is_empty() {
        let log = OperationLog::new();
        let id = OperationId::new();
        assert!(log.is_empty());
        assert!(log.state(&id).is_none());
        assert!(log.history(&id).is_empty());
    }

    fn resolve(log: &OperationLog, id: OperationId) {
        log.on_transition(&transition(id, OperationState::Idle, OperationState::Started));
        log.on_transition(&transition(
            id,
            OperationState::Started,
            OperationState::RejectedStart,
        ));
        log.on_transition(&transition(
            id,
            OperationState::RejectedStart,
            OperationState::Resolved(Resolution::Failure),
        ));
    }

    #[test]
    fn remove_and_clear_shrink_the_log() {
        let log = OperationLog::new();
        let ids: Vec<_> = (0..3).map(|_| OperationId::new()).collect();
        for id in &ids {
            resolve(&log, *id);
        }
        assert_eq!(log.len(), 3);

        assert!(log.remove(&ids[1]));
        assert!(!log.remove(&ids[1]));
        assert_eq!(log.len(), 2);
        assert_eq!(log.operations(None), vec![ids[0], ids[2]]);
        assert!(log.history(&ids[1]).is_empty());

        log.clear();
        assert!(log.is_empty());
        assert!(log.operations(None).is_empty());
    }

    #[test]
    fn retention_evicts_oldest_resolved_only() {
        let log = OperationLog::with_retention(2);
        let pending = OperationId::new();
        log.on_transition(&transition(
            pending,
            OperationState::Idle,
            OperationState::Started,
        ));

        let ids: Vec<_> = (0..5).map(|_| OperationId::new()).collect();
        for id in &ids {
            resolve(&log, *id);
        }

        assert_eq!(log.operations(None), vec![pending, ids[3], ids[4]]);
        assert_eq!(log.state(&pending), Some(OperationState::Started));
        assert!(log.state(&ids[0]).is_none());
    }
}
