//! Player error types.

use thiserror::Error;

/// Player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Player not found
    #[error("Player {0} not found")]
    PlayerNotFound(i64),

    /// Email already registered
    #[error("Email already in use")]
    EmailTaken,

    /// Display name empty or too long
    #[error("Invalid display name")]
    InvalidDisplayName,

    /// Email format rejected
    #[error("Invalid email address")]
    InvalidEmail,
}

impl PlayerError {
    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self {
            PlayerError::Database(_) => "Internal server error".to_string(),
            PlayerError::PlayerNotFound(_) => "Player not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for player operations
pub type PlayerResult<T> = Result<T, PlayerError>;
