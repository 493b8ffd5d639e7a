//! Wallet and ledger data models.
//!
//! All monetary values are fixed-point currency stored as `i64` cents:
//! 1.00 BRL == 100. Arithmetic on amounts is integer arithmetic so payouts
//! and bonuses carry no rounding drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Player ID type
pub type PlayerId = i64;

/// Wallet ID type
pub type WalletId = i64;

/// One currency unit (1.00) in cents
pub const CURRENCY_UNIT: i64 = 100;

/// Wallet model
///
/// The balance is never written directly by callers; every change goes
/// through the [`WalletGuard`](super::WalletGuard) and carries a matching
/// ledger entry, keeping `balance == initial_balance + sum(entries.amount)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub player_id: PlayerId,
    pub balance: i64,
    pub initial_balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ledger entry model (append-only)
///
/// Entries are immutable once written; corrections are new entries with
/// inverse sign. `amount` is signed: stakes and prize clawbacks are
/// negative, payouts, bonuses and refunds are positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub wallet_id: WalletId,
    pub kind: EntryKind,
    pub amount: i64,
    pub balance_after: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Ledger entry kind
///
/// The sign of a mutation is encoded by the guard operation (debit/credit),
/// not by the caller's amount; the kind records what the change was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Funds staked on a bet (negative)
    Stake,
    /// Prize credited for a won bet (positive)
    Payout,
    /// Streak bonus credit (positive)
    Bonus,
    /// Cancellation correction: stake refund (positive) or prize
    /// clawback (negative)
    Reversal,
}

impl EntryKind {
    /// Parse the database representation
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "stake" => Some(EntryKind::Stake),
            "payout" => Some(EntryKind::Payout),
            "bonus" => Some(EntryKind::Bonus),
            "reversal" => Some(EntryKind::Reversal),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Stake => write!(f, "stake"),
            EntryKind::Payout => write!(f, "payout"),
            EntryKind::Bonus => write!(f, "bonus"),
            EntryKind::Reversal => write!(f, "reversal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_db_round_trip() {
        for kind in [
            EntryKind::Stake,
            EntryKind::Payout,
            EntryKind::Bonus,
            EntryKind::Reversal,
        ] {
            assert_eq!(EntryKind::from_db(&kind.to_string()), Some(kind));
        }
        assert_eq!(EntryKind::from_db("rake"), None);
    }
}
