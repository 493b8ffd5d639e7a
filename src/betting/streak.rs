//! Streak bonus evaluation.
//!
//! A player who loses `STREAK_LENGTH` settled bets in a row earns a
//! one-time bonus worth `BONUS_RATE_PERCENT` of the combined stakes.
//! The most recent bonus ledger entry marks where the last rewarded
//! streak ended, so a sixth consecutive loss never re-awards.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use super::{
    controller::bet_from_row,
    errors::{BetError, BetResult},
    models::{Bet, BetStatus},
};
use crate::wallet::{EntryKind, PlayerId, WalletGuard, WalletId};

/// Number of consecutive losses that qualifies for a bonus
pub const STREAK_LENGTH: usize = 5;

/// Bonus rate as a percentage of the combined stakes
pub const BONUS_RATE_PERCENT: i64 = 10;

/// Streak bonus evaluator
#[derive(Clone)]
pub struct StreakBonusEvaluator {
    wallet: WalletGuard,
}

impl StreakBonusEvaluator {
    pub fn new(wallet: WalletGuard) -> Self {
        Self { wallet }
    }

    /// Evaluate the player's loss streak and credit a bonus if one is due
    ///
    /// Runs inside the caller's transaction, immediately after a bet
    /// transitioned to Lost. Returns the credited amount, or `None` when
    /// the streak does not qualify or was already rewarded.
    pub async fn evaluate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player_id: PlayerId,
        wallet_id: WalletId,
    ) -> BetResult<Option<i64>> {
        let recent = self.recent_settled_bets(tx, player_id).await?;

        if !streak_qualifies(&recent) {
            return Ok(None);
        }

        // `recent` is newest-first, so the streak starts at the last element
        let streak_started_at = recent[recent.len() - 1].placed_at;
        let last_bonus = self.wallet.last_bonus_entry(tx, wallet_id).await?;
        if !is_new_streak(last_bonus.map(|e| e.created_at), streak_started_at) {
            return Ok(None);
        }

        let total_staked = recent
            .iter()
            .try_fold(0i64, |sum, bet| sum.checked_add(bet.stake))
            .ok_or(BetError::PayoutOverflow(recent[0].stake))?;
        let Some(bonus) = bonus_amount(total_staked) else {
            return Err(BetError::PayoutOverflow(total_staked));
        };
        if bonus == 0 {
            return Ok(None);
        }

        self.wallet
            .credit(
                tx,
                wallet_id,
                bonus,
                EntryKind::Bonus,
                Some(format!(
                    "Bonus for {STREAK_LENGTH} consecutive losing bets"
                )),
            )
            .await?;

        log::info!("Awarded streak bonus of {bonus} to player {player_id}");

        Ok(Some(bonus))
    }

    /// Fetch the player's most recent settled bets, newest first
    async fn recent_settled_bets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player_id: PlayerId,
    ) -> BetResult<Vec<Bet>> {
        let rows = sqlx::query(
            r#"
            SELECT id, player_id, stake, status, payout, placed_at
            FROM bets
            WHERE player_id = $1 AND status <> 'active'
            ORDER BY placed_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(player_id)
        .bind(STREAK_LENGTH as i64)
        .fetch_all(&mut **tx)
        .await?;

        let bets = rows
            .iter()
            .map(bet_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bets)
    }
}

/// Exactly `STREAK_LENGTH` settled bets, all lost
pub(crate) fn streak_qualifies(recent: &[Bet]) -> bool {
    recent.len() == STREAK_LENGTH && recent.iter().all(|bet| bet.status == BetStatus::Lost)
}

/// A streak is new when no bonus exists, or the last bonus predates the
/// earliest bet of the current streak
pub(crate) fn is_new_streak(
    last_bonus_at: Option<DateTime<Utc>>,
    streak_started_at: DateTime<Utc>,
) -> bool {
    match last_bonus_at {
        None => true,
        Some(awarded_at) => awarded_at < streak_started_at,
    }
}

/// Bonus owed on the combined stakes, `None` on overflow
pub(crate) fn bonus_amount(total_staked: i64) -> Option<i64> {
    total_staked
        .checked_mul(BONUS_RATE_PERCENT)
        .map(|scaled| scaled / 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn bet(id: i64, status: BetStatus, stake: i64, placed_at: DateTime<Utc>) -> Bet {
        Bet {
            id,
            player_id: 1,
            stake,
            status,
            payout: None,
            placed_at,
        }
    }

    fn losses(count: usize) -> Vec<Bet> {
        let base = Utc::now();
        (0..count)
            .map(|i| {
                bet(
                    i as i64,
                    BetStatus::Lost,
                    1000,
                    base - Duration::minutes(i as i64),
                )
            })
            .collect()
    }

    #[test]
    fn test_five_losses_qualify() {
        assert!(streak_qualifies(&losses(5)));
    }

    #[test]
    fn test_short_streak_does_not_qualify() {
        assert!(!streak_qualifies(&losses(4)));
        assert!(!streak_qualifies(&[]));
    }

    #[test]
    fn test_interrupted_streak_does_not_qualify() {
        let mut recent = losses(5);
        recent[2].status = BetStatus::Won;
        assert!(!streak_qualifies(&recent));

        let mut recent = losses(5);
        recent[4].status = BetStatus::Cancelled;
        assert!(!streak_qualifies(&recent));
    }

    #[test]
    fn test_new_streak_without_prior_bonus() {
        assert!(is_new_streak(None, Utc::now()));
    }

    #[test]
    fn test_bonus_inside_current_streak_blocks_award() {
        let streak_start = Utc::now();
        // bonus awarded after the streak started: already rewarded
        assert!(!is_new_streak(
            Some(streak_start + Duration::minutes(1)),
            streak_start
        ));
        assert!(!is_new_streak(Some(streak_start), streak_start));
        // bonus from an older streak does not block
        assert!(is_new_streak(
            Some(streak_start - Duration::minutes(1)),
            streak_start
        ));
    }

    #[test]
    fn test_bonus_amount_is_ten_percent() {
        // 5 stakes of 10.00 -> 50.00 staked -> 5.00 bonus
        assert_eq!(bonus_amount(5000), Some(500));
        assert_eq!(bonus_amount(100), Some(10));
        // truncates toward zero on sub-cent fractions
        assert_eq!(bonus_amount(105), Some(10));
        assert_eq!(bonus_amount(i64::MAX), None);
    }
}
