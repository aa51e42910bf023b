use radio_model::{OperationId, OperationType, Resolution};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("{op}: radio refused to start the operation")]
    StartRejected { op: OperationType },
    #[error("{op} ({id}): no completion event and no progress before the deadline")]
    Timeout { op: OperationType, id: OperationId },
    #[error("{op}: gatt status {status:#04x}")]
    Gatt { op: OperationType, status: u8 },
    #[error("{op}: disconnected with status {status:#04x}")]
    Disconnected { op: OperationType, status: u8 },
    #[error("{op}: result source closed before completion")]
    SourceClosed { op: OperationType },
    #[error("{op}: canceled")]
    Canceled { op: OperationType },
    #[error("radio queue is closed")]
    RadioClosed,
    #[error("operation dropped before producing an outcome")]
    Dropped,
}

impl OperationError {
    /// Terminal resolution this error maps to.
    pub fn resolution(&self) -> Resolution {
        match self {
            OperationError::Timeout { .. } => Resolution::Timeout,
            OperationError::Canceled { .. } => Resolution::Canceled,
            _ => Resolution::Failure,
        }
    }
}
