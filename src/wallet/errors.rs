//! Wallet error types.

use thiserror::Error;

/// Wallet errors
#[derive(Debug, Error)]
pub enum WalletError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Insufficient funds for a debit
    #[error("Insufficient funds: available {available}, required {required}")]
    InsufficientFunds { available: i64, required: i64 },

    /// Wallet not found by ID
    #[error("Wallet {0} not found")]
    WalletNotFound(i64),

    /// No wallet exists for the given player
    #[error("No wallet found for player {0}")]
    WalletNotFoundForPlayer(i64),

    /// Invalid amount (must be positive)
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Balance would overflow
    #[error("Balance overflow")]
    BalanceOverflow,

    /// Stored balance disagrees with the ledger
    #[error("Ledger mismatch for wallet {wallet_id}: balance {balance}, ledger says {expected}")]
    LedgerMismatch {
        wallet_id: i64,
        balance: i64,
        expected: i64,
    },
}

impl WalletError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database errors are sanitized to prevent information disclosure about
    /// the internal system structure, and wallet/player IDs are redacted.
    pub fn client_message(&self) -> String {
        match self {
            WalletError::Database(_) => "Internal server error".to_string(),
            WalletError::WalletNotFound(_) | WalletError::WalletNotFoundForPlayer(_) => {
                "Wallet not found".to_string()
            }
            WalletError::LedgerMismatch { .. } => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_sanitizes_internals() {
        let err = WalletError::WalletNotFound(42);
        assert_eq!(err.client_message(), "Wallet not found");
        assert!(!err.client_message().contains("42"));

        let err = WalletError::LedgerMismatch {
            wallet_id: 7,
            balance: 100,
            expected: 200,
        };
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_client_message_keeps_actionable_errors() {
        let err = WalletError::InsufficientFunds {
            available: 50,
            required: 100,
        };
        assert!(err.client_message().contains("50"));
        assert!(err.client_message().contains("100"));
    }
}
