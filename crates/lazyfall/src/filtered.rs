// ── Filtered loader ──
//
// Wraps a list-valued `LazyLoader` with a pure filter projection,
// recomputed synchronously on every read. Filtering never touches the
// fetch lifecycle: no re-fetch, no status change.

use std::future::Future;

use tokio::sync::watch;

use crate::config::LoaderConfig;
use crate::error::FetchError;
use crate::loader::LazyLoader;
use crate::state::LoaderState;
use crate::status::LoadingStatus;

/// A filter over items of type `T`.
///
/// `matches` is the per-item predicate; `project` derives the visible
/// subset from a raw snapshot and may be overridden for projections
/// beyond plain filtering (ordering, truncation).
pub trait FilterSet<T: Clone>: Default {
    fn matches(&self, item: &T) -> bool;

    fn project(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// A [`LazyLoader`] over a list of `T` plus a mutable filter value.
///
/// The filtered view is recomputed on every [`view()`](Self::view)
/// call; mutating the filter is synchronous and observable via
/// [`filter_changes()`](Self::filter_changes).
pub struct FilteredLoader<T, F>
where
    T: Clone + Send + Sync + 'static,
    F: FilterSet<T> + Clone + Send + Sync + 'static,
{
    loader: LazyLoader<Vec<T>>,
    filters: watch::Sender<F>,
}

impl<T, F> FilteredLoader<T, F>
where
    T: Clone + Send + Sync + 'static,
    F: FilterSet<T> + Clone + Send + Sync + 'static,
{
    /// Create a filtered loader with its own underlying [`LazyLoader`].
    pub fn new<Fetch, Fut>(fetch: Fetch, fallback: Vec<T>, config: LoaderConfig, filters: F) -> Self
    where
        Fetch: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, FetchError>> + Send + 'static,
    {
        Self::from_loader(LazyLoader::new(fetch, fallback, config), filters)
    }

    /// Wrap an existing loader.
    pub fn from_loader(loader: LazyLoader<Vec<T>>, filters: F) -> Self {
        let (filters, _) = watch::channel(filters);
        Self { loader, filters }
    }

    // ── Filtered reads ───────────────────────────────────────────

    /// The visible subset: current data (live or fallback) projected
    /// through the current filter.
    pub fn view(&self) -> Vec<T> {
        self.filters.borrow().project(&self.loader.data())
    }

    /// Current filter value.
    pub fn filters(&self) -> F {
        self.filters.borrow().clone()
    }

    /// Observe filter changes (for consumers that re-render on them).
    pub fn filter_changes(&self) -> watch::Receiver<F> {
        self.filters.subscribe()
    }

    // ── Filter mutation — never touches the fetch lifecycle ──────

    /// Replace the filter wholesale.
    pub fn set_filters(&self, filters: F) {
        self.filters.send_modify(|f| *f = filters);
    }

    /// Mutate the filter in place.
    pub fn update_filters(&self, apply: impl FnOnce(&mut F)) {
        self.filters.send_modify(apply);
    }

    /// Restore the default filter.
    pub fn reset_filters(&self) {
        self.filters.send_modify(|f| *f = F::default());
    }

    // ── Lifecycle passthrough ────────────────────────────────────

    /// The wrapped loader, for subscription or direct reads.
    pub fn loader(&self) -> &LazyLoader<Vec<T>> {
        &self.loader
    }

    /// Unfiltered state snapshot of the wrapped loader.
    pub fn state(&self) -> LoaderState<Vec<T>> {
        self.loader.state()
    }

    /// Lifecycle status of the wrapped loader.
    pub fn status(&self) -> LoadingStatus {
        self.loader.status()
    }

    /// See [`LazyLoader::load`].
    pub fn load(&self, force: bool) {
        self.loader.load(force);
    }

    /// See [`LazyLoader::retry`].
    pub fn retry(&self) {
        self.loader.retry();
    }

    /// See [`LazyLoader::reset`].
    pub fn reset(&self) {
        self.loader.reset();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Topic {
        name: &'static str,
        category: &'static str,
    }

    #[derive(Debug, Clone, Default)]
    struct TopicFilter {
        category: Option<&'static str>,
    }

    impl FilterSet<Topic> for TopicFilter {
        fn matches(&self, item: &Topic) -> bool {
            self.category.is_none_or(|c| item.category == c)
        }
    }

    fn sample_topics() -> Vec<Topic> {
        vec![
            Topic { name: "Ownership", category: "Programming" },
            Topic { name: "Sorting", category: "Algorithms" },
            Topic { name: "Lifetimes", category: "Programming" },
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn default_filter_passes_everything_through() {
        let loader = FilteredLoader::new(
            || async { Ok(sample_topics()) },
            Vec::new(),
            LoaderConfig::manual(),
            TopicFilter::default(),
        );
        loader.load(false);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(loader.status(), LoadingStatus::Success);
        assert_eq!(loader.view().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn filter_projects_view_without_refetch_or_status_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(sample_topics()) }
            }
        };
        let loader = FilteredLoader::new(
            fetch,
            Vec::new(),
            LoaderConfig::manual(),
            TopicFilter::default(),
        );
        loader.load(false);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let status_before = loader.status();

        loader.update_filters(|f| f.category = Some("Programming"));
        let view = loader.view();
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|t| t.category == "Programming"));
        assert_eq!(loader.status(), status_before);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        loader.reset_filters();
        assert_eq!(loader.view().len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn filter_applies_to_fallback_data_too() {
        let loader = FilteredLoader::new(
            || async { Ok(Vec::new()) },
            sample_topics(),
            LoaderConfig::manual(),
            TopicFilter { category: Some("Algorithms") },
        );

        // Never loaded: view projects the static fallback.
        assert_eq!(loader.status(), LoadingStatus::Idle);
        assert_eq!(loader.view(), vec![Topic { name: "Sorting", category: "Algorithms" }]);
    }
}
