// ── Fetch boundary error type ──
//
// The normalized failure contract between a fetch operation and the
// loader. Consumers never see transport-specific rejection shapes --
// whatever HTTP/IPC/storage layer backs the fetch, its wrapper
// translates failures into a `FetchError` before they reach the
// loader.

use thiserror::Error;

/// Generic message used when a failure carries no text of its own.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to load data";

/// Normalized failure reason produced by a fetch operation.
///
/// The loader absorbs every `FetchError` into its observable state
/// (`status = Error`, `error = message`); nothing is re-thrown to the
/// consumer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Failure with a human-readable message from the underlying source.
    #[error("{0}")]
    Message(String),

    /// Failure with no usable message (e.g. an opaque transport drop).
    #[error("{GENERIC_FETCH_FAILURE}")]
    Unspecified,
}

impl FetchError {
    /// The message as shown to consumers.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        if message.trim().is_empty() {
            Self::Unspecified
        } else {
            Self::Message(message)
        }
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::from(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchError, GENERIC_FETCH_FAILURE};

    #[test]
    fn message_variant_displays_verbatim() {
        let err = FetchError::from("subjects endpoint returned 503");
        assert_eq!(err.message(), "subjects endpoint returned 503");
    }

    #[test]
    fn empty_message_normalizes_to_unspecified() {
        assert_eq!(FetchError::from("   "), FetchError::Unspecified);
        assert_eq!(FetchError::Unspecified.message(), GENERIC_FETCH_FAILURE);
    }
}
