#![forbid(unsafe_code)]

//! The gesture lifecycle shared by every recognizer.
//!
//! ```text
//! Possible ──► Began ──► Changed* ──► Ended | Cancelled
//!    │
//!    └──────► Failed
//! ```
//!
//! `Ended`, `Cancelled` and `Failed` are terminal: the only way out is an
//! explicit `reset`, which returns the recognizer to `Possible`.

use std::fmt;

/// Recognition state of a single recognizer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GestureState {
    /// Waiting for enough evidence to decide (initial state).
    #[default]
    Possible,
    /// The gesture was recognized and interpretation started.
    Began,
    /// A recognized gesture received further motion.
    Changed,
    /// The gesture completed successfully.
    Ended,
    /// A recognized gesture was interrupted by its input source.
    Cancelled,
    /// The input did not match this gesture.
    Failed,
}

impl GestureState {
    /// Whether only `reset` can leave this state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }

    /// Whether the gesture has been recognized and is still running.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    /// Stable lowercase name, used in logs and traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Possible => "possible",
            Self::Began => "began",
            Self::Changed => "changed",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
