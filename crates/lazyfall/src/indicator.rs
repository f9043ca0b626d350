// ── Loading indicator projection ──
//
// Pure mapping from loader status to a user-facing descriptor. No side
// effects; safe to call on every render or poll.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::GENERIC_FETCH_FAILURE;
use crate::status::LoadingStatus;

/// What kind of indicator the UI should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum IndicatorCategory {
    Loading,
    Static,
    Error,
    None,
}

/// User-facing loading indicator descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Whether anything should be shown at all.
    pub visible: bool,
    pub category: IndicatorCategory,
    pub message: String,
}

/// Project a loader status (and its error text, if any) into an
/// [`Indicator`].
///
/// | status          | visible | category | message                  |
/// |-----------------|---------|----------|--------------------------|
/// | `Loading`       | yes     | Loading  | "Loading..."             |
/// | `ShowingStatic` | yes     | Static   | sample-data notice       |
/// | `Error`         | yes     | Error    | error text, or a generic |
/// | `Idle`/`Success`| no      | None     | ""                       |
pub fn indicator(status: LoadingStatus, error: Option<&str>) -> Indicator {
    match status {
        LoadingStatus::Loading => Indicator {
            visible: true,
            category: IndicatorCategory::Loading,
            message: "Loading...".to_owned(),
        },
        LoadingStatus::ShowingStatic => Indicator {
            visible: true,
            category: IndicatorCategory::Static,
            message: "Showing sample data while loading...".to_owned(),
        },
        LoadingStatus::Error => Indicator {
            visible: true,
            category: IndicatorCategory::Error,
            message: error
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_FETCH_FAILURE)
                .to_owned(),
        },
        LoadingStatus::Idle | LoadingStatus::Success => Indicator {
            visible: false,
            category: IndicatorCategory::None,
            message: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_shows_spinner_text() {
        let ind = indicator(LoadingStatus::Loading, None);
        assert!(ind.visible);
        assert_eq!(ind.category, IndicatorCategory::Loading);
        assert_eq!(ind.message, "Loading...");
    }

    #[test]
    fn showing_static_announces_sample_data() {
        let ind = indicator(LoadingStatus::ShowingStatic, None);
        assert!(ind.visible);
        assert_eq!(ind.category, IndicatorCategory::Static);
        assert_eq!(ind.message, "Showing sample data while loading...");
    }

    #[test]
    fn error_prefers_the_supplied_message() {
        let ind = indicator(LoadingStatus::Error, Some("lessons endpoint unreachable"));
        assert_eq!(ind.category, IndicatorCategory::Error);
        assert_eq!(ind.message, "lessons endpoint unreachable");
    }

    #[test]
    fn error_without_text_falls_back_to_generic() {
        assert_eq!(
            indicator(LoadingStatus::Error, None).message,
            GENERIC_FETCH_FAILURE
        );
        assert_eq!(
            indicator(LoadingStatus::Error, Some("")).message,
            GENERIC_FETCH_FAILURE
        );
    }

    #[test]
    fn idle_and_success_are_hidden() {
        for status in [LoadingStatus::Idle, LoadingStatus::Success] {
            let ind = indicator(status, None);
            assert!(!ind.visible);
            assert_eq!(ind.category, IndicatorCategory::None);
            assert!(ind.message.is_empty());
        }
    }
}
