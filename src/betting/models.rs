//! Bet data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wallet::{CURRENCY_UNIT, PlayerId};

/// Bet ID type
pub type BetId = i64;

/// Minimum stake accepted for a bet (1.00)
pub const MIN_STAKE: i64 = CURRENCY_UNIT;

/// Bet model
///
/// Created Active, settled exactly once to Won or Lost, and optionally
/// cancelled afterwards. Cancelled is absorbing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub player_id: PlayerId,
    /// Stake in cents, always > 0
    pub stake: i64,
    pub status: BetStatus,
    /// Prize in cents, set only when the bet was won
    pub payout: Option<i64>,
    pub placed_at: DateTime<Utc>,
}

/// Bet lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Active,
    Won,
    Lost,
    Cancelled,
}

impl BetStatus {
    /// Parse the database representation
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "active" => Some(BetStatus::Active),
            "won" => Some(BetStatus::Won),
            "lost" => Some(BetStatus::Lost),
            "cancelled" => Some(BetStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether the bet has been resolved or cancelled
    pub fn is_settled(&self) -> bool {
        !matches!(self, BetStatus::Active)
    }
}

impl std::fmt::Display for BetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetStatus::Active => write!(f, "active"),
            BetStatus::Won => write!(f, "won"),
            BetStatus::Lost => write!(f, "lost"),
            BetStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_round_trip() {
        for status in [
            BetStatus::Active,
            BetStatus::Won,
            BetStatus::Lost,
            BetStatus::Cancelled,
        ] {
            assert_eq!(BetStatus::from_db(&status.to_string()), Some(status));
        }
        assert_eq!(BetStatus::from_db("pending"), None);
    }

    #[test]
    fn test_only_active_is_unsettled() {
        assert!(!BetStatus::Active.is_settled());
        assert!(BetStatus::Won.is_settled());
        assert!(BetStatus::Lost.is_settled());
        assert!(BetStatus::Cancelled.is_settled());
    }
}
