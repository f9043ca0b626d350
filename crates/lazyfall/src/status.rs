// ── Loading lifecycle status ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// Where a loader is in its fetch-vs-fallback lifecycle.
///
/// Mutually exclusive; transitions only along the edges documented on
/// [`LazyLoader`](crate::LazyLoader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum LoadingStatus {
    /// No load attempted yet. Displayed data is the static fallback.
    Idle,
    /// Fetch in flight; the reveal timer has not fired.
    Loading,
    /// Fetch still in flight past the reveal delay; displayed data is
    /// the static fallback.
    ShowingStatic,
    /// Fetch resolved; displayed data is the fetched value.
    Success,
    /// Fetch rejected; displayed data reverted to the static fallback.
    /// An automatic retry may be pending.
    Error,
}

impl LoadingStatus {
    /// True while a fetch is in flight (reveal timer fired or not).
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Loading | Self::ShowingStatic)
    }

    /// True once the lifecycle has settled until the next external
    /// trigger (`Success`, or `Error` awaiting retry).
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}
