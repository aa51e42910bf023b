use std::{fmt, sync::Arc};

use radio_model::OperationType;
use tokio::runtime::Handle;

use crate::{OperationHandle, RadioLease, Subscribe};

/// Where operations schedule their waits and who hears about their transitions.
#[derive(Clone)]
pub struct RunContext {
    handle: Handle,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl RunContext {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            subscribers: Vec::new(),
        }
    }

    /// Context bound to the runtime of the caller.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers.extend(subscribers);
        self
    }

    #[inline]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    #[inline]
    pub fn subscribers(&self) -> &[Arc<dyn Subscribe>] {
        &self.subscribers
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.subscribers.iter().map(|s| s.name()).collect();
        f.debug_struct("RunContext")
            .field("subscribers", &names)
            .finish()
    }
}

/// A unit of work that needs exclusive use of the radio.
///
/// The operation receives the lease already granted and owns its release from then on:
/// it must release exactly once on every exit path, before its outcome becomes observable.
pub trait RadioOperation: Send + 'static {
    type Output: Send + 'static;

    fn op(&self) -> OperationType;

    fn run(self, lease: RadioLease, ctx: &RunContext) -> OperationHandle<Self::Output>;
}
