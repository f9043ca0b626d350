// ── Loader tuning configuration ──
//
// These values describe *how* a loader paces its lifecycle. The
// consumer constructs a `LoaderConfig` and hands it in; the loader
// never reads config files or environment.

use std::time::Duration;

/// Tuning knobs for a [`LazyLoader`](crate::LazyLoader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// How long a fetch may stay pending before the static fallback is
    /// revealed as the displayed data. A soft timeout: the fetch keeps
    /// running and its settlement still wins.
    pub static_reveal_delay: Duration,

    /// Delay before an automatic retry after a failed fetch.
    pub retry_delay: Duration,

    /// Ceiling on automatic retry attempts per failure episode.
    /// Exhausting it leaves the loader in `Error` until a manual
    /// [`retry()`](crate::LazyLoader::retry).
    pub max_retries: u32,

    /// Start the lifecycle immediately at construction instead of
    /// waiting for an explicit [`load()`](crate::LazyLoader::load).
    pub auto_load: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            static_reveal_delay: Duration::from_millis(1000),
            retry_delay: Duration::from_millis(3000),
            max_retries: 3,
            auto_load: true,
        }
    }
}

impl LoaderConfig {
    /// Config for manually driven loaders (no load at construction).
    pub fn manual() -> Self {
        Self {
            auto_load: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LoaderConfig;
    use std::time::Duration;

    #[test]
    fn defaults_match_documented_values() {
        let config = LoaderConfig::default();
        assert_eq!(config.static_reveal_delay, Duration::from_millis(1000));
        assert_eq!(config.retry_delay, Duration::from_millis(3000));
        assert_eq!(config.max_retries, 3);
        assert!(config.auto_load);
    }

    #[test]
    fn manual_only_disables_auto_load() {
        let config = LoaderConfig::manual();
        assert!(!config.auto_load);
        assert_eq!(config.max_retries, LoaderConfig::default().max_retries);
    }
}
