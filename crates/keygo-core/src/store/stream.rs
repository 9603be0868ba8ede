// ── Store subscriptions ──
//
// Observer side of a reactive store: point-in-time access plus
// change notification, either awaited directly or as a `Stream`.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::cell::Snapshot;

/// A subscription to a single store value.
pub struct StoreStream<T: Send + Sync + 'static> {
    current: Arc<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> StoreStream<T> {
    pub(crate) fn new(mut receiver: watch::Receiver<Snapshot<T>>) -> Self {
        // Marks the current value as seen, so `changed()` waits for the next write.
        let current = Arc::clone(&receiver.borrow_and_update().value);
        Self { current, receiver }
    }

    /// The value captured at subscription time, or at the last `changed()`.
    pub fn current(&self) -> &Arc<T> {
        &self.current
    }

    /// The latest value (may have changed since `current`).
    pub fn latest(&self) -> Arc<T> {
        Arc::clone(&self.receiver.borrow().value)
    }

    /// Wait for the next write, returning the new value.
    /// Returns `None` once the owning store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<T>> {
        self.receiver.changed().await.ok()?;
        let value = Arc::clone(&self.receiver.borrow_and_update().value);
        self.current = Arc::clone(&value);
        Some(value)
    }

    /// Convert into a `Stream` that yields the latest value first, then
    /// every subsequent write.
    pub fn into_stream(self) -> StoreWatchStream<T> {
        StoreWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StoreWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> Stream for StoreWatchStream<T> {
    type Item = Arc<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin, so re-pinning the field is fine.
        Pin::new(&mut self.inner)
            .poll_next(cx)
            .map(|snap| snap.map(|snap| snap.value))
    }
}
