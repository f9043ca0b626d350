// ── Lazy loader ──
//
// Full lifecycle management for one asynchronous fetch-vs-fallback
// data source. Handles the reveal timer, bounded automatic retry,
// and reactive state publication through a watch channel.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::config::LoaderConfig;
use crate::error::FetchError;
use crate::state::LoaderState;
use crate::status::LoadingStatus;
use crate::stream::StateStream;

/// Boxed future returned by a fetch operation.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send>>;

type FetchFn<T> = Arc<dyn Fn() -> FetchFuture<T> + Send + Sync>;

// ── LazyLoader ───────────────────────────────────────────────────

/// Controller for one lazily loaded data source with a static fallback.
///
/// Owns the fetch lifecycle: at most one non-forced fetch in flight,
/// a reveal timer that swaps in the fallback while the fetch is slow,
/// and a bounded automatic retry episode after failures. State is
/// published as immutable [`LoaderState`] snapshots; consumers read
/// via [`state()`](Self::state) or subscribe via
/// [`subscribe()`](Self::subscribe).
///
/// State machine (initial state `Idle`):
///
/// ```text
/// Idle --load()--> Loading
/// Loading --reveal timer--> ShowingStatic      (data = fallback)
/// Loading | ShowingStatic --resolve--> Success
/// Loading | ShowingStatic --reject--> Error
/// Success --load(force)--> Loading
/// Error --auto-retry (count < max)--> Loading
/// Error --retry()--> Loading
/// any --reset()--> Idle
/// ```
///
/// Failures never escape as errors: every rejection is absorbed into
/// `status = Error` with the fallback as displayed data.
///
/// Cheaply cloneable via `Arc`. Dropping the last clone cancels all
/// pending timers; a fetch that settles afterwards mutates nothing.
#[derive(Clone)]
pub struct LazyLoader<T: Clone + Send + Sync + 'static> {
    inner: Arc<LoaderInner<T>>,
}

struct LoaderInner<T> {
    fetch: FetchFn<T>,
    fallback: Arc<T>,
    config: LoaderConfig,
    state: watch::Sender<LoaderState<T>>,

    /// Monotonically increasing load generation. A settlement or timer
    /// firing whose generation no longer matches the latest issued is
    /// stale and discarded.
    generation: AtomicU64,

    /// Root teardown token — cancelled on shutdown/drop, never replaced.
    cancel: CancellationToken,

    /// Child token scoping the currently armed timer (reveal or retry).
    /// Replaced through `begin_episode` on every exit path.
    episode: Mutex<CancellationToken>,
}

impl<T> Drop for LoaderInner<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<T: Clone + Send + Sync + 'static> LazyLoader<T> {
    /// Create a loader for `fetch` with `fallback` as the always
    /// available substitute value.
    ///
    /// Must be called within a tokio runtime. With
    /// [`auto_load`](LoaderConfig::auto_load) set (the default) the
    /// first fetch starts immediately.
    pub fn new<F, Fut>(fetch: F, fallback: T, config: LoaderConfig) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let fallback = Arc::new(fallback);
        let (state, _) = watch::channel(LoaderState::idle(Arc::clone(&fallback)));
        let cancel = CancellationToken::new();
        let episode = Mutex::new(cancel.child_token());

        let loader = Self {
            inner: Arc::new(LoaderInner {
                fetch: Arc::new(move || Box::pin(fetch()) as FetchFuture<T>),
                fallback,
                config,
                state,
                generation: AtomicU64::new(0),
                cancel,
                episode,
            }),
        };

        if config.auto_load {
            loader.load(false);
        }
        loader
    }

    // ── Imperative triggers ──────────────────────────────────────

    /// Start a fetch.
    ///
    /// A no-op while a non-forced fetch is already `Loading` — the
    /// trigger is idempotent. `force` bypasses the guard (used by
    /// [`retry()`](Self::retry) and the auto-retry timer); the
    /// generation guard makes the latest issued load win over any
    /// earlier fetch that settles late.
    pub fn load(&self, force: bool) {
        if !force && self.inner.state.borrow().status == LoadingStatus::Loading {
            trace!("load ignored: fetch already in flight");
            return;
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let episode = self.begin_episode();
        debug!(generation, force, "starting load");

        self.inner.state.send_modify(|s| {
            s.status = LoadingStatus::Loading;
            s.error = None;
        });

        self.arm_reveal_timer(generation, &episode);

        let loader = self.clone();
        tokio::spawn(async move {
            let result = (loader.inner.fetch)().await;
            loader.settle(generation, &episode, result);
        });
    }

    /// Manual retry: clears the retry budget and force-starts a fetch
    /// immediately, cancelling any pending auto-retry timer.
    pub fn retry(&self) {
        debug!("manual retry requested");
        self.inner.state.send_modify(|s| s.retry_count = 0);
        self.load(true);
    }

    /// Return to `Idle`: cancels all pending timers, discards any
    /// in-flight fetch result, and restores the fallback as data.
    pub fn reset(&self) {
        debug!("reset");
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.begin_episode();
        self.inner
            .state
            .send_modify(|s| *s = LoaderState::idle(Arc::clone(&self.inner.fallback)));
    }

    /// Tear the loader down: cancels timers and suppresses any future
    /// state mutation from in-flight fetches. Also happens implicitly
    /// when the last clone is dropped.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    // ── Read surface ─────────────────────────────────────────────

    /// Current state snapshot.
    pub fn state(&self) -> LoaderState<T> {
        self.inner.state.borrow().clone()
    }

    /// Currently displayed value: fallback or last successful result.
    pub fn data(&self) -> Arc<T> {
        Arc::clone(&self.inner.state.borrow().data)
    }

    /// Current lifecycle status.
    pub fn status(&self) -> LoadingStatus {
        self.inner.state.borrow().status
    }

    /// Message from the most recent failure, if any.
    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    /// Automatic retries consumed in the current failure episode.
    pub fn retry_count(&self) -> u32 {
        self.inner.state.borrow().retry_count
    }

    /// The static fallback value this loader was constructed with.
    pub fn fallback(&self) -> Arc<T> {
        Arc::clone(&self.inner.fallback)
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream<T> {
        StateStream::new(self.inner.state.subscribe())
    }

    // ── Internals ────────────────────────────────────────────────

    /// Centralized timer cleanup: cancel whatever timer is armed and
    /// install a fresh episode token. Every exit path (settlement,
    /// retry, reset, new load) goes through here, so at most one
    /// timer is ever live.
    fn begin_episode(&self) -> CancellationToken {
        let fresh = self.inner.cancel.child_token();
        let mut slot = self
            .inner
            .episode
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.cancel();
        *slot = fresh.clone();
        fresh
    }

    /// Arm the soft reveal timeout: if the fetch is still pending when
    /// it fires, the fallback becomes the displayed data. The fetch is
    /// not cancelled — its settlement still wins later.
    fn arm_reveal_timer(&self, generation: u64, episode: &CancellationToken) {
        let inner = Arc::clone(&self.inner);
        let episode = episode.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = episode.cancelled() => {}
                () = tokio::time::sleep(inner.config.static_reveal_delay) => {
                    if inner.generation.load(Ordering::SeqCst) != generation {
                        return;
                    }
                    trace!(generation, "reveal timer fired, showing static data");
                    inner.state.send_modify(|s| {
                        if s.status == LoadingStatus::Loading {
                            s.status = LoadingStatus::ShowingStatic;
                            s.data = Arc::clone(&inner.fallback);
                        }
                    });
                }
            }
        });
    }

    /// Apply a fetch settlement, unless it is stale or the loader has
    /// been torn down.
    fn settle(&self, generation: u64, episode: &CancellationToken, result: Result<T, FetchError>) {
        let inner = &self.inner;
        if inner.cancel.is_cancelled() {
            return;
        }
        if inner.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale fetch settlement");
            return;
        }

        // Kill the reveal timer before touching state.
        episode.cancel();

        match result {
            Ok(value) => {
                debug!(generation, "fetch resolved");
                inner.state.send_modify(|s| {
                    s.status = LoadingStatus::Success;
                    s.data = Arc::new(value);
                    s.error = None;
                    s.retry_count = 0;
                });
            }
            Err(err) => {
                warn!(generation, error = %err, "fetch failed");
                inner.state.send_modify(|s| {
                    s.status = LoadingStatus::Error;
                    s.error = Some(err.message());
                    s.data = Arc::clone(&inner.fallback);
                });

                let retries_used = inner.state.borrow().retry_count;
                if retries_used < inner.config.max_retries {
                    self.arm_retry_timer(generation);
                } else {
                    debug!(
                        max_retries = inner.config.max_retries,
                        "automatic retries exhausted, waiting for manual retry"
                    );
                }
            }
        }
    }

    /// Arm the one-shot auto-retry timer after a failure.
    fn arm_retry_timer(&self, generation: u64) {
        let episode = self.begin_episode();
        let loader = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = episode.cancelled() => {}
                () = tokio::time::sleep(loader.inner.config.retry_delay) => {
                    if loader.inner.generation.load(Ordering::SeqCst) != generation {
                        return;
                    }
                    loader.inner.state.send_modify(|s| s.retry_count += 1);
                    let attempt = loader.inner.state.borrow().retry_count;
                    debug!(attempt, "auto-retry timer fired");
                    loader.load(true);
                }
            }
        });
    }
}
