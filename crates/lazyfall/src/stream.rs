// ── Reactive state subscription ──
//
// Subscription handle for consuming loader state changes.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::state::LoaderState;

/// A subscription to a loader's state transitions.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via [`changed()`](Self::changed) or by converting to
/// a `Stream`.
pub struct StateStream<T: Clone + Send + Sync + 'static> {
    current: LoaderState<T>,
    receiver: watch::Receiver<LoaderState<T>>,
}

impl<T: Clone + Send + Sync + 'static> StateStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<LoaderState<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or by the last `changed()`.
    pub fn current(&self) -> &LoaderState<T> {
        &self.current
    }

    /// The latest snapshot (may have moved on since `current`).
    pub fn latest(&self) -> LoaderState<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next transition, returning the new snapshot.
    /// Returns `None` once the owning loader has been dropped.
    pub async fn changed(&mut self) -> Option<LoaderState<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> StateWatchStream<T> {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields a fresh [`LoaderState`] snapshot on every transition.
pub struct StateWatchStream<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<LoaderState<T>>,
}

impl<T: Clone + Send + Sync + 'static> Stream for StateWatchStream<T> {
    type Item = LoaderState<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin when the item type is Unpin, which
        // LoaderState always is.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
