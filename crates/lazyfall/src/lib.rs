//! Lazy-loading state machine with static fallback data.
//!
//! This crate owns one small but sharp-edged piece of UI data plumbing:
//! fetching live data while guaranteeing the consumer always has
//! *something* usable to render. It exposes:
//!
//! - **[`LazyLoader<T>`]** — Controller for one asynchronous fetch
//!   lifecycle: [`load()`](LazyLoader::load) starts a fetch and arms a
//!   soft reveal timeout that swaps in the static fallback if the fetch
//!   is slow; failures are absorbed into observable state and retried
//!   automatically up to a bounded budget. [`retry()`](LazyLoader::retry)
//!   and [`reset()`](LazyLoader::reset) drive the lifecycle imperatively.
//!
//! - **[`StateStream<T>`]** — Subscription handle vended by the loader.
//!   Exposes `current()` / `latest()` / `changed()` for reactive
//!   rendering, or `into_stream()` for `StreamExt` combinators.
//!
//! - **[`FilteredLoader<T, F>`]** — A list-valued loader plus a mutable
//!   [`FilterSet`] projection, recomputed synchronously on every read.
//!   Filtering never re-fetches and never changes status.
//!
//! - **[`indicator()`]** — Pure projection from [`LoadingStatus`] to a
//!   user-facing [`Indicator`] descriptor.
//!
//! The fetch operation is caller-supplied: any
//! `Fn() -> impl Future<Output = Result<T, FetchError>>`. Transport
//! errors are normalized into [`FetchError`] *before* they reach the
//! loader — the loader never inspects HTTP or I/O error shapes.
//!
//! # Example
//!
//! ```no_run
//! use lazyfall::{LazyLoader, LoaderConfig};
//!
//! # async fn fetch_subjects() -> Result<Vec<String>, lazyfall::FetchError> { Ok(vec![]) }
//! # async fn demo() {
//! let subjects = LazyLoader::new(
//!     fetch_subjects,
//!     vec!["Sample subject".to_owned()],
//!     LoaderConfig::default(),
//! );
//!
//! let mut updates = subjects.subscribe();
//! while let Some(state) = updates.changed().await {
//!     println!("{}: {} items", state.status, state.data.len());
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filtered;
pub mod indicator;
pub mod loader;
pub mod state;
pub mod status;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::LoaderConfig;
pub use error::{FetchError, GENERIC_FETCH_FAILURE};
pub use filtered::{FilterSet, FilteredLoader};
pub use indicator::{Indicator, IndicatorCategory, indicator};
pub use loader::{FetchFuture, LazyLoader};
pub use state::LoaderState;
pub use status::LoadingStatus;
pub use stream::{StateStream, StateWatchStream};
