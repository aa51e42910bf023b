//! Execution of one radio operation with a bounded wait.
//!
//! ## Protocol
//!
//! 1. **Arm.** The result source is already subscribed; the deadline is anchored now.
//!    The waiting future is built but not polled.
//! 2. **Start.** The start action is invoked synchronously, exactly once.
//! 3. **Branch.**
//!    - rejected: the armed future is dropped unpolled (no timer ever runs, the source is unsubscribed)
//!      and the operation resolves with [`OperationError::StartRejected`];
//!    - accepted: the armed future is spawned on the [`RunContext`] runtime and resolves with the first
//!      source event, or, once the deadline passes, with whatever the [`FallbackProber`] decides.
//!
//! Every terminal path goes through one finalization point that records the resolution, releases the
//! [`RadioLease`] and only then delivers the outcome. A second outcome is discarded.
mod tracker;

use std::{
    marker::PhantomData,
    sync::{Arc, Mutex},
};

use radio_model::{OperationId, OperationState, OperationType, Resolution, TimeoutConfig};
use tokio::{
    sync::oneshot,
    time::{Instant, timeout_at},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    FallbackProber, OperationError, ProbeContext, RadioLease, RadioOperation, ResultSource,
    RunContext,
};
use tracker::Tracker;

/// The synchronous call that asks the hardware to begin.
///
/// Returns `false` when the hardware refuses to start.
pub trait StartAction: Send + 'static {
    fn start(self) -> bool;
}

impl<F> StartAction for F
where
    F: FnOnce() -> bool + Send + 'static,
{
    fn start(self) -> bool {
        self()
    }
}

/// One hardware operation with all of its collaborators bound.
///
/// Executed once; [`OperationUnit::execute`] consumes it.
pub struct OperationUnit<T, A, S, P> {
    id: OperationId,
    op: OperationType,
    start: A,
    source: S,
    prober: P,
    timeouts: TimeoutConfig,
    ctx: RunContext,
    _output: PhantomData<fn() -> T>,
}

impl<T, A, S, P> OperationUnit<T, A, S, P>
where
    T: Send + 'static,
    A: StartAction,
    S: ResultSource<T> + 'static,
    P: FallbackProber<T> + 'static,
{
    pub fn new(
        op: OperationType,
        start: A,
        source: S,
        prober: P,
        timeouts: TimeoutConfig,
        ctx: RunContext,
    ) -> Self {
        Self {
            id: OperationId::new(),
            op,
            start,
            source,
            prober,
            timeouts,
            ctx,
            _output: PhantomData,
        }
    }

    pub fn with_id(mut self, id: OperationId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Run the operation while holding `lease`.
    ///
    /// Returns once the start call has been answered; the outcome arrives through the handle.
    pub fn execute(self, lease: RadioLease) -> OperationHandle<T> {
        let OperationUnit {
            id,
            op,
            start,
            source,
            prober,
            timeouts,
            ctx,
            ..
        } = self;

        let (tx, rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let completion = Arc::new(Completion {
            tx: Mutex::new(Some(tx)),
            lease,
            tracker: Tracker::new(id, op, ctx.subscribers().to_vec()),
        });

        let deadline = Instant::now() + timeouts.timeout();
        let probe_ctx = ProbeContext {
            id,
            op,
            grace: timeouts.grace(),
        };
        let waiter = {
            let completion = Arc::clone(&completion);
            let cancel = cancel.clone();
            async move {
                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(OperationError::Canceled { op }),
                    outcome = await_outcome(source, &prober, deadline, probe_ctx, &completion.tracker) => outcome,
                };
                completion.complete(outcome);
            }
        };

        completion.tracker.advance(OperationState::Started, None);
        if start.start() {
            completion
                .tracker
                .advance(OperationState::AwaitingResult, None);
            ctx.handle().spawn(waiter);
        } else {
            debug!(target: "radio.core.unit", %id, %op, "start call rejected");
            cancel.cancel();
            drop(waiter);
            completion
                .tracker
                .advance(OperationState::RejectedStart, None);
            completion.complete(Err(OperationError::StartRejected { op }));
        }

        OperationHandle {
            id,
            op,
            cancel,
            rx,
        }
    }
}

impl<T, A, S, P> RadioOperation for OperationUnit<T, A, S, P>
where
    T: Send + 'static,
    A: StartAction,
    S: ResultSource<T> + 'static,
    P: FallbackProber<T> + 'static,
{
    type Output = T;

    fn op(&self) -> OperationType {
        self.op
    }

    fn run(mut self, lease: RadioLease, ctx: &RunContext) -> OperationHandle<T> {
        self.ctx = ctx
            .clone()
            .with_subscribers(self.ctx.subscribers().to_vec());
        self.execute(lease)
    }
}

async fn await_outcome<T, S, P>(
    mut source: S,
    prober: &P,
    deadline: Instant,
    ctx: ProbeContext,
    tracker: &Tracker,
) -> Result<T, OperationError>
where
    S: ResultSource<T>,
    P: FallbackProber<T>,
{
    match timeout_at(deadline, source.next_result()).await {
        Ok(Some(result)) => result,
        Ok(None) => Err(OperationError::SourceClosed { op: ctx.op }),
        Err(_) => {
            drop(source);
            warn!(
                target: "radio.core.unit",
                id = %ctx.id,
                op = %ctx.op,
                "deadline expired without completion event; probing hardware state"
            );
            tracker.advance(OperationState::AwaitingFallback, None);
            prober.probe(ctx).await
        }
    }
}

/// Single finalization point of an operation.
///
/// Releases the lease before the outcome is delivered, on every path including success.
struct Completion<T> {
    tx: Mutex<Option<oneshot::Sender<Result<T, OperationError>>>>,
    lease: RadioLease,
    tracker: Tracker,
}

impl<T> Completion<T> {
    fn complete(&self, outcome: Result<T, OperationError>) -> bool {
        let Some(tx) = self.tx.lock().unwrap_or_else(|p| p.into_inner()).take() else {
            debug!(target: "radio.core.unit", "duplicate outcome discarded");
            return false;
        };

        let (resolution, reason) = match &outcome {
            Ok(_) => (Resolution::Success, None),
            Err(e) => (e.resolution(), Some(e.to_string())),
        };
        self.tracker
            .advance(OperationState::Resolved(resolution), reason);
        self.lease.release();

        if tx.send(outcome).is_err() {
            debug!(target: "radio.core.unit", "outcome dropped; submitter went away");
        }
        true
    }
}

/// Caller side of a running operation.
#[derive(Debug)]
pub struct OperationHandle<T> {
    id: OperationId,
    op: OperationType,
    cancel: CancellationToken,
    rx: oneshot::Receiver<Result<T, OperationError>>,
}

impl<T> OperationHandle<T> {
    #[inline]
    pub fn id(&self) -> OperationId {
        self.id
    }

    #[inline]
    pub fn op(&self) -> OperationType {
        self.op
    }

    /// Abort the wait. The operation resolves as canceled unless it already resolved.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the terminal outcome.
    pub async fn outcome(self) -> Result<T, OperationError> {
        self.rx.await.unwrap_or(Err(OperationError::Dropped))
    }
}
