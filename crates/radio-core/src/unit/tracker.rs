use std::sync::{Arc, Mutex};

use radio_model::{OperationId, OperationState, OperationType};
use tracing::{trace, warn};

use crate::subscriber::{Subscribe, Transition};

/// State machine of one operation plus fan-out of its transitions.
pub(crate) struct Tracker {
    id: OperationId,
    op: OperationType,
    state: Mutex<OperationState>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl Tracker {
    pub(crate) fn new(id: OperationId, op: OperationType, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        Self {
            id,
            op,
            state: Mutex::new(OperationState::Idle),
            subscribers,
        }
    }

    /// Move to `next`; illegal transitions are logged and ignored.
    pub(crate) fn advance(&self, next: OperationState, reason: Option<String>) -> bool {
        let from = {
            let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
            let from = *state;
            match from.transition(next) {
                Ok(to) => *state = to,
                Err(e) => {
                    warn!(target: "radio.core.unit", id = %self.id, op = %self.op, error = %e, "transition ignored");
                    return false;
                }
            }
            from
        };

        trace!(target: "radio.core.unit", id = %self.id, op = %self.op, ?from, to = ?next, "transition");
        if self.subscribers.is_empty() {
            return true;
        }
        let transition = Transition {
            id: self.id,
            op: self.op,
            from,
            to: next,
            reason,
        };
        for sub in &self.subscribers {
            sub.on_transition(&transition);
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> OperationState {
        *self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
