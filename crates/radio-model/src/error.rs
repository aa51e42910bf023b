use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown operation type: {0}")]
    UnknownOperationType(String),
    #[error("illegal state transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: crate::OperationState,
        to: crate::OperationState,
    },
}
