//! Completion events for one class of radio operation.
//!
//! A source is armed (subscribed) before the start call is issued, so an event fired right after the call is
//! buffered by the channel rather than lost. Only the first item is consumed; dropping the source unsubscribes.
use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use crate::OperationError;

#[async_trait]
pub trait ResultSource<T>: Send {
    /// Wait for the next completion event.
    ///
    /// `None` means the source is closed and nothing will ever arrive.
    async fn next_result(&mut self) -> Option<Result<T, OperationError>>;
}

/// A lagged receiver has already lost the oldest buffered events, which includes the one answering this
/// operation. The wait then continues with the next event, or falls through to the deadline.
#[async_trait]
impl<T> ResultSource<T> for broadcast::Receiver<Result<T, OperationError>>
where
    T: Clone + Send + 'static,
{
    async fn next_result(&mut self) -> Option<Result<T, OperationError>> {
        loop {
            match self.recv().await {
                Ok(result) => return Some(result),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(target: "radio.core.source", skipped, "result source lagged; first event lost, waiting for next event");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[async_trait]
impl<T> ResultSource<T> for mpsc::Receiver<Result<T, OperationError>>
where
    T: Send + 'static,
{
    async fn next_result(&mut self) -> Option<Result<T, OperationError>> {
        self.recv().await
    }
}

#[async_trait]
impl<T> ResultSource<T> for mpsc::UnboundedReceiver<Result<T, OperationError>>
where
    T: Send + 'static,
{
    async fn next_result(&mut self) -> Option<Result<T, OperationError>> {
        self.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_model::OperationType;

    #[tokio::test]
    async fn broadcast_event_sent_before_wait_is_buffered() {
        let (tx, mut rx) = broadcast::channel::<Result<u32, OperationError>>(4);
        tx.send(Ok(7)).unwrap();
        assert_eq!(rx.next_result().await, Some(Ok(7)));
    }

    #[tokio::test]
    async fn broadcast_skips_lag() {
        let (tx, mut rx) = broadcast::channel::<Result<u32, OperationError>>(1);
        tx.send(Ok(1)).unwrap();
        tx.send(Ok(2)).unwrap();
        assert_eq!(rx.next_result().await, Some(Ok(2)));
    }

    #[tokio::test]
    async fn closed_broadcast_yields_none() {
        let (tx, mut rx) = broadcast::channel::<Result<u32, OperationError>>(1);
        drop(tx);
        assert_eq!(rx.next_result().await, None);
    }

    #[tokio::test]
    async fn mpsc_passes_errors_through() {
        let (tx, mut rx) = mpsc::channel::<Result<u32, OperationError>>(1);
        let err = OperationError::Gatt {
            op: OperationType::ServiceDiscovery,
            status: 0x85,
        };
        tx.send(Err(err.clone())).await.unwrap();
        assert_eq!(rx.next_result().await, Some(Err(err)));
    }
}
