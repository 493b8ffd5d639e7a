//! Bet error types and the boundary-facing error taxonomy.

use thiserror::Error;

use crate::wallet::WalletError;

/// Bet errors
#[derive(Debug, Error)]
pub enum BetError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stake below the minimum unit
    #[error("Stake {stake} is below the minimum of {minimum}")]
    StakeBelowMinimum { stake: i64, minimum: i64 },

    /// Payout computation would overflow
    #[error("Payout for stake {0} overflows")]
    PayoutOverflow(i64),

    /// Player not found
    #[error("Player {0} not found")]
    PlayerNotFound(i64),

    /// No wallet for the player
    #[error("Wallet not found for player {0}")]
    WalletNotFound(i64),

    /// Bet not found
    #[error("Bet {0} not found")]
    BetNotFound(i64),

    /// Caller does not own the bet
    #[error("Bet {bet_id} does not belong to player {caller}")]
    NotBetOwner { bet_id: i64, caller: i64 },

    /// Bet already cancelled
    #[error("Bet {0} has already been cancelled")]
    AlreadyCancelled(i64),

    /// Debit rejected: balance below the required amount
    #[error("Insufficient funds: available {available}, required {required}")]
    InsufficientFunds { available: i64, required: i64 },

    /// Wallet-layer failure with no dedicated mapping
    #[error("Wallet error: {0}")]
    Wallet(WalletError),

    /// Unexpected failure in a collaborator
    #[error("Operation failed: {0}")]
    Internal(String),
}

/// Boundary-facing error classification
///
/// Lets the transport layer map engine errors to responses without
/// matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recoverable client-side: fix the request and retry
    Validation,
    /// Missing player, wallet, or bet
    NotFound,
    /// Caller is not allowed to act on this resource
    Unauthorized,
    /// State forbids the operation (e.g. re-cancel)
    Conflict,
    /// Balance too low; distinct from validation so clients can prompt top-up
    InsufficientFunds,
    /// Unexpected failure; the transaction was rolled back in full
    Internal,
}

impl BetError {
    /// Classify this error for the service boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            BetError::StakeBelowMinimum { .. } | BetError::PayoutOverflow(_) => {
                ErrorKind::Validation
            }
            BetError::PlayerNotFound(_)
            | BetError::WalletNotFound(_)
            | BetError::BetNotFound(_) => ErrorKind::NotFound,
            BetError::NotBetOwner { .. } => ErrorKind::Unauthorized,
            BetError::AlreadyCancelled(_) => ErrorKind::Conflict,
            BetError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            BetError::Database(_) | BetError::Wallet(_) | BetError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "Internal server error".to_string(),
            ErrorKind::NotFound => match self {
                BetError::BetNotFound(_) => "Bet not found".to_string(),
                BetError::WalletNotFound(_) => "Wallet not found".to_string(),
                _ => "Player not found".to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl From<WalletError> for BetError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InsufficientFunds {
                available,
                required,
            } => BetError::InsufficientFunds {
                available,
                required,
            },
            WalletError::WalletNotFoundForPlayer(player_id) => BetError::WalletNotFound(player_id),
            WalletError::Database(e) => BetError::Database(e),
            other => BetError::Wallet(other),
        }
    }
}

impl From<crate::player::PlayerError> for BetError {
    fn from(err: crate::player::PlayerError) -> Self {
        use crate::player::PlayerError;
        match err {
            PlayerError::Database(e) => BetError::Database(e),
            PlayerError::PlayerNotFound(id) => BetError::PlayerNotFound(id),
            // registration-only errors never reach the betting paths
            other => BetError::Internal(other.to_string()),
        }
    }
}

/// Result type for bet operations
pub type BetResult<T> = Result<T, BetError>;
