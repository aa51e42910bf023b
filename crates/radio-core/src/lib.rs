pub mod error;
pub use error::OperationError;
pub mod lease;
pub use lease::RadioLease;
pub mod operation;
pub use operation::{RadioOperation, RunContext};
pub mod probe;
pub use probe::{FallbackProber, GraceProbe, NoFallback, ProbeContext, StateAccessor};
pub mod queue;
pub use queue::RadioQueue;
pub mod source;
pub use source::ResultSource;
pub mod subscriber;
pub use subscriber::{OperationLog, Subscribe, Transition};
pub mod unit;
pub use unit::{OperationHandle, OperationUnit, StartAction};
