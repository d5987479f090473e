use thiserror::Error;

pub type Result<T> = std::result::Result<T, GestureError>;

/// Errors reported while constructing a recognizer.
///
/// Recognition outcomes are never errors: a sequence that does not match ends
/// in [`GestureState::Failed`](crate::GestureState::Failed), an interrupted
/// one in [`GestureState::Cancelled`](crate::GestureState::Cancelled).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("{gesture} recognizer requires an input target")]
    MissingTarget { gesture: &'static str },

    #[error("invalid {gesture} configuration: {reason}")]
    InvalidConfig {
        gesture: &'static str,
        reason: String,
    },
}

impl GestureError {
    #[must_use]
    pub fn invalid(gesture: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            gesture,
            reason: reason.into(),
        }
    }

    /// Name of the gesture whose construction failed.
    #[must_use]
    pub const fn gesture(&self) -> &'static str {
        match self {
            Self::MissingTarget { gesture } | Self::InvalidConfig { gesture, .. } => gesture,
        }
    }
}
