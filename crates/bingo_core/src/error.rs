use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WinConditionError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },
}

impl WinConditionError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        WinConditionError::InvalidArgument { reason: reason.into() }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        WinConditionError::InvalidState { reason: reason.into() }
    }

    /// A rejected configuration can be re-issued with valid values; a broken
    /// precondition cannot.
    pub fn is_recoverable(&self) -> bool {
        match self {
            WinConditionError::InvalidArgument { .. } => true,
            WinConditionError::InvalidState { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, WinConditionError>;
