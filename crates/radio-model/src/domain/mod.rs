mod operation_id;
pub use operation_id::OperationId;

mod operation_type;
pub use operation_type::OperationType;

mod operation_state;
pub use operation_state::{OperationState, Resolution};

mod timeout;
pub use timeout::TimeoutConfig;

/// Duration value in milliseconds.
///
/// Used by configuration structs that must stay serializable.
pub type DurationMs = u64;
