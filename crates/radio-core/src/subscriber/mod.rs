mod log;
pub use log::OperationLog;

use radio_model::{OperationId, OperationState, OperationType};

/// One state change of a radio operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: OperationId,
    pub op: OperationType,
    pub from: OperationState,
    pub to: OperationState,
    /// Failure reason for terminal transitions that did not succeed.
    pub reason: Option<String>,
}

/// Observer of operation state transitions.
///
/// Called inline on the context that performed the transition; implementations must not block.
pub trait Subscribe: Send + Sync {
    fn on_transition(&self, transition: &Transition);

    fn name(&self) -> &'static str;
}
