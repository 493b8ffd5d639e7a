//! Bet lifecycle controller.
//!
//! Orchestrates placement, resolution, and cancellation. Every operation
//! runs as one database transaction: the wallet mutation, the ledger
//! append, and the bet status write commit together or not at all.

use sqlx::{PgPool, Postgres, Row, Transaction};
use std::sync::Arc;

use super::{
    errors::{BetError, BetResult},
    models::{Bet, BetId, BetStatus, MIN_STAKE},
    resolver::{Outcome, OutcomeResolver, RandomSource},
    streak::StreakBonusEvaluator,
};
use crate::paging::{Page, PageRequest};
use crate::player::PlayerManager;
use crate::wallet::{EntryKind, LedgerEntry, PlayerId, WalletGuard, WalletId};

/// Bet lifecycle controller
#[derive(Clone)]
pub struct BetController {
    pool: Arc<PgPool>,
    wallet: WalletGuard,
    players: PlayerManager,
    resolver: OutcomeResolver,
    streak: StreakBonusEvaluator,
}

impl BetController {
    /// Create a controller backed by the process random generator
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_resolver(pool, OutcomeResolver::default())
    }

    /// Create a controller with an explicit random source
    ///
    /// Lets tests pin outcomes with a seeded or scripted source.
    pub fn with_random_source(pool: Arc<PgPool>, source: Arc<dyn RandomSource>) -> Self {
        Self::with_resolver(pool, OutcomeResolver::new(source))
    }

    fn with_resolver(pool: Arc<PgPool>, resolver: OutcomeResolver) -> Self {
        let wallet = WalletGuard::new(pool.clone());
        Self {
            streak: StreakBonusEvaluator::new(wallet.clone()),
            players: PlayerManager::new(pool.clone()),
            wallet,
            resolver,
            pool,
        }
    }

    /// Place a bet and resolve it synchronously
    ///
    /// Placement and resolution are one user-visible operation; the caller
    /// never observes an Active bet. The debit, the bet row, the ledger
    /// entries, and the outcome all commit as a single transaction.
    ///
    /// # Errors
    ///
    /// * `BetError::StakeBelowMinimum` - Stake under 1.00; nothing mutated
    /// * `BetError::PlayerNotFound` - Unknown player
    /// * `BetError::WalletNotFound` - Player has no wallet
    /// * `BetError::InsufficientFunds` - Balance below the stake
    pub async fn place_bet(&self, player_id: PlayerId, stake: i64) -> BetResult<Bet> {
        if stake < MIN_STAKE {
            return Err(BetError::StakeBelowMinimum {
                stake,
                minimum: MIN_STAKE,
            });
        }
        if !self.players.exists(player_id).await? {
            return Err(BetError::PlayerNotFound(player_id));
        }
        let wallet = self.wallet.get_wallet_by_owner(player_id).await?;

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO bets (player_id, stake, status)
            VALUES ($1, $2, 'active')
            RETURNING id, player_id, stake, status, payout, placed_at
            "#,
        )
        .bind(player_id)
        .bind(stake)
        .fetch_one(&mut *tx)
        .await?;
        let bet = bet_from_row(&row)?;

        self.wallet
            .debit(
                &mut tx,
                wallet.id,
                stake,
                EntryKind::Stake,
                Some(format!("Bet#{}", bet.id)),
            )
            .await?;

        let bet = self.settle(&mut tx, bet, wallet.id).await?;

        tx.commit().await?;

        log::info!(
            "Player {player_id} placed bet {} for {stake}, settled {}",
            bet.id,
            bet.status
        );

        Ok(bet)
    }

    /// Resolve an active bet
    ///
    /// Idempotent guard against duplicate invocation: returns `Ok(None)`
    /// when the bet is absent or no longer Active.
    pub async fn resolve_bet(&self, bet_id: BetId) -> BetResult<Option<Bet>> {
        let mut tx = self.pool.begin().await?;

        let Some(bet) = fetch_bet_for_update(&mut tx, bet_id).await? else {
            return Ok(None);
        };
        if bet.status != BetStatus::Active {
            return Ok(None);
        }

        let wallet_id = wallet_id_for_player(&mut tx, bet.player_id).await?;
        let bet = self.settle(&mut tx, bet, wallet_id).await?;

        tx.commit().await?;

        Ok(Some(bet))
    }

    /// Cancel a bet, reversing its wallet effects
    ///
    /// Restores the balance the wallet had immediately before the bet was
    /// placed: Active and Lost bets get the stake back in one reversal
    /// entry; Won bets get the stake refunded and the prize clawed back in
    /// two separate entries.
    ///
    /// # Errors
    ///
    /// * `BetError::BetNotFound` - No such bet
    /// * `BetError::NotBetOwner` - Caller does not own the bet
    /// * `BetError::AlreadyCancelled` - Cancelled is absorbing
    /// * `BetError::InsufficientFunds` - Prize clawback exceeds the balance
    pub async fn cancel_bet(&self, bet_id: BetId, caller: PlayerId) -> BetResult<Bet> {
        let mut tx = self.pool.begin().await?;

        let mut bet = fetch_bet_for_update(&mut tx, bet_id)
            .await?
            .ok_or(BetError::BetNotFound(bet_id))?;
        if bet.player_id != caller {
            return Err(BetError::NotBetOwner { bet_id, caller });
        }
        if bet.status == BetStatus::Cancelled {
            return Err(BetError::AlreadyCancelled(bet_id));
        }

        let wallet_id = wallet_id_for_player(&mut tx, bet.player_id).await?;

        match (bet.status, bet.payout) {
            (BetStatus::Won, Some(payout)) => {
                // Two explicit reversal entries, not one netted amount:
                // the refund and the clawback stay separately auditable
                self.wallet
                    .credit(
                        &mut tx,
                        wallet_id,
                        bet.stake,
                        EntryKind::Reversal,
                        Some(format!("Cancellation of Bet#{bet_id} - stake refund")),
                    )
                    .await?;
                self.wallet
                    .debit(
                        &mut tx,
                        wallet_id,
                        payout,
                        EntryKind::Reversal,
                        Some(format!("Cancellation of Bet#{bet_id} - prize clawback")),
                    )
                    .await?;
            }
            _ => {
                let note = match bet.status {
                    BetStatus::Lost => format!("Cancellation of Bet#{bet_id} (lost)"),
                    _ => format!("Cancellation of Bet#{bet_id}"),
                };
                self.wallet
                    .credit(&mut tx, wallet_id, bet.stake, EntryKind::Reversal, Some(note))
                    .await?;
            }
        }

        sqlx::query("UPDATE bets SET status = 'cancelled' WHERE id = $1")
            .bind(bet_id)
            .execute(&mut *tx)
            .await?;
        bet.status = BetStatus::Cancelled;

        tx.commit().await?;

        log::info!("Player {caller} cancelled bet {bet_id}");

        Ok(bet)
    }

    /// List a player's bets, newest first
    pub async fn list_bets(
        &self,
        player_id: PlayerId,
        request: PageRequest,
    ) -> BetResult<Page<Bet>> {
        if !self.players.exists(player_id).await? {
            return Err(BetError::PlayerNotFound(player_id));
        }

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM bets WHERE player_id = $1")
            .bind(player_id)
            .fetch_one(self.pool.as_ref())
            .await?
            .get("total");

        let rows = sqlx::query(
            r#"
            SELECT id, player_id, stake, status, payout, placed_at
            FROM bets
            WHERE player_id = $1
            ORDER BY placed_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(player_id)
        .bind(request.page_size)
        .bind(request.offset())
        .fetch_all(self.pool.as_ref())
        .await?;

        let bets = rows
            .iter()
            .map(bet_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(bets, total, request))
    }

    /// List a player's ledger entries, newest first
    pub async fn list_ledger(
        &self,
        player_id: PlayerId,
        request: PageRequest,
    ) -> BetResult<Page<LedgerEntry>> {
        let wallet = self.wallet.get_wallet_by_owner(player_id).await?;
        Ok(self.wallet.entries(wallet.id, request).await?)
    }

    /// Apply the drawn outcome to an active bet inside the caller's
    /// transaction
    async fn settle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut bet: Bet,
        wallet_id: WalletId,
    ) -> BetResult<Bet> {
        match self.resolver.draw() {
            Outcome::Won => {
                let payout =
                    OutcomeResolver::payout(bet.stake).ok_or(BetError::PayoutOverflow(bet.stake))?;

                sqlx::query("UPDATE bets SET status = 'won', payout = $1 WHERE id = $2")
                    .bind(payout)
                    .bind(bet.id)
                    .execute(&mut **tx)
                    .await?;

                self.wallet
                    .credit(
                        tx,
                        wallet_id,
                        payout,
                        EntryKind::Payout,
                        Some(format!("Prize for Bet#{}", bet.id)),
                    )
                    .await?;

                bet.status = BetStatus::Won;
                bet.payout = Some(payout);
            }
            Outcome::Lost => {
                sqlx::query("UPDATE bets SET status = 'lost' WHERE id = $1")
                    .bind(bet.id)
                    .execute(&mut **tx)
                    .await?;
                bet.status = BetStatus::Lost;

                self.streak.evaluate(tx, bet.player_id, wallet_id).await?;
            }
        }

        Ok(bet)
    }
}

/// Fetch a bet row-locked for the duration of the transaction
async fn fetch_bet_for_update(
    tx: &mut Transaction<'_, Postgres>,
    bet_id: BetId,
) -> BetResult<Option<Bet>> {
    let row = sqlx::query(
        r#"
        SELECT id, player_id, stake, status, payout, placed_at
        FROM bets
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(bet_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.as_ref().map(bet_from_row).transpose()?)
}

/// Look up a player's wallet ID inside the transaction
async fn wallet_id_for_player(
    tx: &mut Transaction<'_, Postgres>,
    player_id: PlayerId,
) -> BetResult<WalletId> {
    let row = sqlx::query("SELECT id FROM wallets WHERE player_id = $1")
        .bind(player_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(BetError::WalletNotFound(player_id))?;

    Ok(row.get("id"))
}

pub(crate) fn bet_from_row(row: &sqlx::postgres::PgRow) -> Result<Bet, sqlx::Error> {
    let status = row.get::<String, _>("status");
    let status = BetStatus::from_db(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".into(),
        source: format!("unrecognized bet status {status:?}").into(),
    })?;

    Ok(Bet {
        id: row.get("id"),
        player_id: row.get("player_id"),
        stake: row.get("stake"),
        status,
        payout: row.get("payout"),
        placed_at: row.get::<chrono::NaiveDateTime, _>("placed_at").and_utc(),
    })
}
