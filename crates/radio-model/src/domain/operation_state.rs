use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Terminal result kind of a radio operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// Completion event arrived, or the fallback probe recovered the result.
    Success,
    /// Start call rejected or the result source reported an error.
    Failure,
    /// Deadline expired and the fallback probe found no progress.
    Timeout,
    /// Operation was canceled by its submitter.
    Canceled,
}

/// Execution state of a single radio operation.
///
/// ```text
/// Idle -> Started -> AwaitingResult -> Resolved(Success | Failure | Canceled)
///                 |                 -> AwaitingFallback -> Resolved(Success | Timeout | Failure | Canceled)
///                 -> RejectedStart  -> Resolved(Failure)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationState {
    /// Constructed, listener armed, start call not yet issued.
    Idle,
    /// Start call issued, its synchronous answer not yet evaluated.
    Started,
    /// Start call accepted; waiting for the completion event or the deadline.
    AwaitingResult,
    /// Start call refused to begin.
    RejectedStart,
    /// Deadline expired; the fallback probe is inspecting hardware state.
    AwaitingFallback,
    /// Terminal.
    Resolved(Resolution),
}

impl OperationState {
    /// Returns `true` if the operation will not transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Resolved(_))
    }

    /// Returns `true` while the operation holds the radio and waits for an answer.
    pub fn is_waiting(&self) -> bool {
        matches!(
            self,
            OperationState::AwaitingResult | OperationState::AwaitingFallback
        )
    }

    pub fn can_transition_to(&self, next: OperationState) -> bool {
        use OperationState::*;
        use Resolution::*;

        matches!(
            (self, next),
            (Idle, Started)
                | (Started, AwaitingResult)
                | (Started, RejectedStart)
                | (RejectedStart, Resolved(Failure))
                | (AwaitingResult, AwaitingFallback)
                | (AwaitingResult, Resolved(Success | Failure | Canceled))
                | (AwaitingFallback, Resolved(_))
        )
    }

    /// Checked transition.
    pub fn transition(self, next: OperationState) -> Result<OperationState, ModelError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ModelError::IllegalTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl Default for OperationState {
    fn default() -> Self {
        OperationState::Idle
    }
}
