//! Recovery for hardware that finishes the work but never signals completion.
//!
//! When the deadline fires the unit hands control to a [`FallbackProber`] instead of failing outright.
//! [`GraceProbe`] reads the hardware state directly:
//! - no progress at all: the operation timed out;
//! - some progress: the state may still be filling in, so wait one grace interval and read it again.
use std::time::Duration;

use async_trait::async_trait;
use radio_model::{OperationId, OperationType};
use tracing::debug;

use crate::OperationError;

/// What the prober knows about the operation it is rescuing.
#[derive(Debug, Clone, Copy)]
pub struct ProbeContext {
    pub id: OperationId,
    pub op: OperationType,
    /// Extra wait applied when partial progress is observed.
    pub grace: Duration,
}

impl ProbeContext {
    pub fn timeout(&self) -> OperationError {
        OperationError::Timeout {
            op: self.op,
            id: self.id,
        }
    }
}

#[async_trait]
pub trait FallbackProber<T>: Send + Sync {
    async fn probe(&self, ctx: ProbeContext) -> Result<T, OperationError>;
}

/// Synchronous, side-effect-free read of current hardware state.
pub trait StateAccessor: Send + Sync {
    type Snapshot: Send;

    fn read(&self) -> Self::Snapshot;

    /// Whether the snapshot shows the operation made any progress.
    fn has_progress(&self, snapshot: &Self::Snapshot) -> bool;
}

/// Probe that trusts a non-empty state after one grace interval.
#[derive(Debug, Clone)]
pub struct GraceProbe<A> {
    accessor: A,
}

impl<A> GraceProbe<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }
}

#[async_trait]
impl<A> FallbackProber<A::Snapshot> for GraceProbe<A>
where
    A: StateAccessor,
{
    async fn probe(&self, ctx: ProbeContext) -> Result<A::Snapshot, OperationError> {
        let first = self.accessor.read();
        if !self.accessor.has_progress(&first) {
            debug!(target: "radio.core.probe", id = %ctx.id, op = %ctx.op, "no progress observed");
            return Err(ctx.timeout());
        }
        drop(first);

        debug!(
            target: "radio.core.probe",
            id = %ctx.id,
            op = %ctx.op,
            grace_ms = ctx.grace.as_millis() as u64,
            "partial progress observed; waiting before re-reading state"
        );
        tokio::time::sleep(ctx.grace).await;
        Ok(self.accessor.read())
    }
}

/// Probe for operations without a recovery heuristic: the deadline is final.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

#[async_trait]
impl<T> FallbackProber<T> for NoFallback
where
    T: Send + 'static,
{
    async fn probe(&self, ctx: ProbeContext) -> Result<T, OperationError> {
        Err(ctx.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    /// Returns the scripted snapshots in order, repeating the last one.
    struct Scripted {
        reads: Mutex<Vec<Vec<u32>>>,
        count: AtomicUsize,
    }

    impl Scripted {
        fn new(reads: Vec<Vec<u32>>) -> Self {
            Self {
                reads: Mutex::new(reads),
                count: AtomicUsize::new(0),
            }
        }
    }

    impl StateAccessor for Scripted {
        type Snapshot = Vec<u32>;

        fn read(&self) -> Vec<u32> {
            self.count.fetch_add(1, Ordering::SeqCst);
            let mut reads = self.reads.lock().unwrap();
            if reads.len() > 1 {
                reads.remove(0)
            } else {
                reads[0].clone()
            }
        }

        fn has_progress(&self, snapshot: &Vec<u32>) -> bool {
            !snapshot.is_empty()
        }
    }

    fn ctx(grace: Duration) -> ProbeContext {
        ProbeContext {
            id: OperationId::new(),
            op: OperationType::ServiceDiscovery,
            grace,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_state_is_timeout() {
        let probe = GraceProbe::new(Scripted::new(vec![vec![]]));
        let ctx = ctx(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        let err = probe.probe(ctx).await.unwrap_err();

        assert_eq!(err, ctx.timeout());
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(probe.accessor().count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn partial_state_is_reread_after_grace() {
        let probe = GraceProbe::new(Scripted::new(vec![vec![1], vec![1, 2, 3]]));
        let started = tokio::time::Instant::now();

        let snapshot = probe.probe(ctx(Duration::from_secs(5))).await.unwrap();

        assert_eq!(snapshot, vec![1, 2, 3]);
        assert_eq!(started.elapsed(), Duration::from_secs(5));
        assert_eq!(probe.accessor().count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn no_fallback_always_times_out() {
        let ctx = ctx(Duration::from_secs(5));
        let res: Result<u32, _> = NoFallback.probe(ctx).await;
        assert_eq!(res, Err(ctx.timeout()));
    }
}
