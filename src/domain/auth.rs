//! Authentication status as reported by the auth collaborator.

use serde::{Deserialize, Serialize};

/// Session status of the signed-in user.
///
/// The history screen renders nothing until the status is [`AuthState::Success`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AuthState {
    #[default]
    Pending,
    Success {
        role: String,
    },
    Error {
        message: String,
    },
}

impl AuthState {
    /// Role of the signed-in user, if authenticated.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::Success { role } => Some(role),
            Self::Pending | Self::Error { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
