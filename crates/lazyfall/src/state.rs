// ── Observable loader state snapshot ──

use std::sync::Arc;

use crate::status::LoadingStatus;

/// Point-in-time snapshot of a loader's observable state.
///
/// Cheaply cloneable (`data` is behind an `Arc`). Snapshots are
/// immutable: the loader publishes a fresh one on every transition
/// through its `watch` channel.
///
/// Invariant: `data` is never absent — it holds the static fallback
/// until a fetch succeeds, and reverts to the fallback on failure.
#[derive(Debug, Clone)]
pub struct LoaderState<T> {
    /// Current lifecycle status.
    pub status: LoadingStatus,
    /// Displayed value: fallback or the most recent successful result.
    pub data: Arc<T>,
    /// Message from the most recent failure, cleared on load/reset.
    pub error: Option<String>,
    /// Automatic retries consumed in the current failure episode.
    pub retry_count: u32,
}

impl<T> LoaderState<T> {
    pub(crate) fn idle(fallback: Arc<T>) -> Self {
        Self {
            status: LoadingStatus::Idle,
            data: fallback,
            error: None,
            retry_count: 0,
        }
    }

    /// Fetch in flight, reveal timer not yet fired.
    pub fn is_loading(&self) -> bool {
        self.status == LoadingStatus::Loading
    }

    /// Fetch in flight past the reveal delay; `data` is the fallback.
    pub fn is_showing_static(&self) -> bool {
        self.status == LoadingStatus::ShowingStatic
    }

    /// Fetch resolved; `data` is live.
    pub fn is_success(&self) -> bool {
        self.status == LoadingStatus::Success
    }

    /// Fetch rejected; `data` reverted to the fallback.
    pub fn is_error(&self) -> bool {
        self.status == LoadingStatus::Error
    }

    /// True only when `data` holds a fetched value rather than the
    /// static fallback.
    pub fn has_real_data(&self) -> bool {
        self.status == LoadingStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::LoaderState;
    use crate::status::LoadingStatus;
    use std::sync::Arc;

    #[test]
    fn idle_snapshot_holds_fallback() {
        let state = LoaderState::idle(Arc::new(vec!["sample"]));
        assert_eq!(state.status, LoadingStatus::Idle);
        assert_eq!(*state.data, vec!["sample"]);
        assert!(state.error.is_none());
        assert_eq!(state.retry_count, 0);
        assert!(!state.has_real_data());
    }

    #[test]
    fn derived_booleans_track_status() {
        let mut state = LoaderState::idle(Arc::new(0u32));
        state.status = LoadingStatus::ShowingStatic;
        assert!(state.is_showing_static());
        assert!(!state.is_loading());

        state.status = LoadingStatus::Success;
        assert!(state.is_success());
        assert!(state.has_real_data());
    }
}
