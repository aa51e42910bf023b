//! Serializes radio operations onto the single radio.
//!
//! Admission is FIFO: waiting submissions are granted the radio in the order they asked for it.
//! The granted [`RadioLease`] returns the radio when released, so the next operation starts as soon as the
//! current one resolves, before its submitter even observes the outcome.
use std::{fmt, sync::Arc};

use tokio::sync::Semaphore;
use tracing::{debug, instrument, trace};

use crate::{OperationError, RadioLease, RadioOperation, RunContext, Subscribe};

#[derive(Clone)]
pub struct RadioQueue {
    radio: Arc<Semaphore>,
    ctx: RunContext,
}

impl RadioQueue {
    pub fn new(ctx: RunContext) -> Self {
        Self {
            radio: Arc::new(Semaphore::new(1)),
            ctx,
        }
    }

    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.ctx = self.ctx.with_subscriber(subscriber);
        self
    }

    /// Wait for the radio, run `operation` on it and return its outcome.
    ///
    /// Dropping the returned future cancels the operation; the radio is still released exactly once.
    #[instrument(level = "debug", skip(self, operation), fields(op = %operation.op()))]
    pub async fn submit<O>(&self, operation: O) -> Result<O::Output, OperationError>
    where
        O: RadioOperation,
    {
        let permit = Arc::clone(&self.radio)
            .acquire_owned()
            .await
            .map_err(|_| OperationError::RadioClosed)?;
        trace!(target: "radio.core.queue", "radio acquired");

        let lease = RadioLease::new(move || drop(permit));
        let handle = operation.run(lease, &self.ctx);
        let _cancel_on_drop = handle.cancellation_token().drop_guard();

        let outcome = handle.outcome().await;
        if let Err(e) = &outcome {
            debug!(target: "radio.core.queue", error = %e, "operation failed");
        }
        outcome
    }

    /// Whether an operation currently holds the radio.
    pub fn is_busy(&self) -> bool {
        self.radio.available_permits() == 0
    }

    /// Refuse further submissions.
    ///
    /// Submissions still waiting for the radio fail with [`OperationError::RadioClosed`]; the operation
    /// currently holding it runs to completion.
    pub fn close(&self) {
        self.radio.close();
    }

    pub fn is_closed(&self) -> bool {
        self.radio.is_closed()
    }
}

impl fmt::Debug for RadioQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioQueue")
            .field("busy", &self.is_busy())
            .field("closed", &self.is_closed())
            .finish()
    }
}
