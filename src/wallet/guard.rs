//! Wallet guard implementation with append-only ledger.
//!
//! The guard is the only sanctioned way to move money. Every debit or
//! credit updates the wallet row and appends the matching ledger entry
//! inside the caller's transaction, so no observer can see one without
//! the other.

use super::{
    errors::{WalletError, WalletResult},
    models::{EntryKind, LedgerEntry, PlayerId, Wallet, WalletId},
};
use crate::paging::{Page, PageRequest};
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::sync::Arc;

/// Wallet guard
///
/// Owns the invariant that a wallet's balance equals its initial endowment
/// plus the signed sum of its ledger entries.
#[derive(Clone)]
pub struct WalletGuard {
    pool: Arc<PgPool>,
}

impl WalletGuard {
    /// Create a new wallet guard
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Get a wallet by ID
    pub async fn get_wallet(&self, wallet_id: WalletId) -> WalletResult<Wallet> {
        let row = sqlx::query(
            r#"
            SELECT id, player_id, balance, initial_balance, currency, created_at, updated_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(wallet_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(WalletError::WalletNotFound(wallet_id))?;

        Ok(wallet_from_row(&row))
    }

    /// Get the wallet owned by a player
    pub async fn get_wallet_by_owner(&self, player_id: PlayerId) -> WalletResult<Wallet> {
        let row = sqlx::query(
            r#"
            SELECT id, player_id, balance, initial_balance, currency, created_at, updated_at
            FROM wallets
            WHERE player_id = $1
            "#,
        )
        .bind(player_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(WalletError::WalletNotFoundForPlayer(player_id))?;

        Ok(wallet_from_row(&row))
    }

    /// Debit a wallet inside the caller's transaction
    ///
    /// The balance check and the balance write are a single conditional
    /// UPDATE, so concurrent debits cannot overdraw the wallet. `amount`
    /// must be positive; the ledger entry is written with `-amount`.
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidAmount` - Amount is zero or negative
    /// * `WalletError::InsufficientFunds` - Balance below amount; nothing mutated
    /// * `WalletError::WalletNotFound` - No such wallet
    pub async fn debit(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
        amount: i64,
        kind: EntryKind,
        note: Option<String>,
    ) -> WalletResult<i64> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount(amount));
        }

        // Atomic check-and-update: only succeeds when the balance covers
        // the debit, closing the read-then-write overdraft race
        let result = sqlx::query(
            "UPDATE wallets
             SET balance = balance - $1, updated_at = NOW()
             WHERE id = $2 AND balance >= $1
             RETURNING balance",
        )
        .bind(amount)
        .bind(wallet_id)
        .fetch_optional(&mut **tx)
        .await?;

        let new_balance: i64 = match result {
            Some(row) => row.get("balance"),
            None => {
                // Either the wallet doesn't exist or the balance is short;
                // check which case it is
                let check = sqlx::query("SELECT balance FROM wallets WHERE id = $1")
                    .bind(wallet_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                match check {
                    Some(row) => {
                        return Err(WalletError::InsufficientFunds {
                            available: row.get("balance"),
                            required: amount,
                        });
                    }
                    None => return Err(WalletError::WalletNotFound(wallet_id)),
                }
            }
        };

        self.append_entry(tx, wallet_id, kind, -amount, new_balance, note)
            .await?;

        Ok(new_balance)
    }

    /// Credit a wallet inside the caller's transaction
    ///
    /// `amount` must be positive; the ledger entry is written with `+amount`.
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidAmount` - Amount is zero or negative
    /// * `WalletError::WalletNotFound` - No such wallet
    /// * `WalletError::BalanceOverflow` - Credit would overflow the balance
    pub async fn credit(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
        amount: i64,
        kind: EntryKind,
        note: Option<String>,
    ) -> WalletResult<i64> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount(amount));
        }

        // Lock the row for the duration of the transaction
        let row = sqlx::query("SELECT balance FROM wallets WHERE id = $1 FOR UPDATE")
            .bind(wallet_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(WalletError::WalletNotFound(wallet_id))?;

        let current_balance: i64 = row.get("balance");
        let new_balance = current_balance
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow)?;

        sqlx::query("UPDATE wallets SET balance = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_balance)
            .bind(wallet_id)
            .execute(&mut **tx)
            .await?;

        self.append_entry(tx, wallet_id, kind, amount, new_balance, note)
            .await?;

        Ok(new_balance)
    }

    /// Append a ledger entry (signed amount)
    async fn append_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
        kind: EntryKind,
        amount: i64,
        balance_after: i64,
        note: Option<String>,
    ) -> WalletResult<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO ledger_entries (wallet_id, kind, amount, balance_after, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(wallet_id)
        .bind(kind.to_string())
        .bind(amount)
        .bind(balance_after)
        .bind(note)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row.get("id"))
    }

    /// Get ledger entries for a wallet, newest first
    pub async fn entries(
        &self,
        wallet_id: WalletId,
        request: PageRequest,
    ) -> WalletResult<Page<LedgerEntry>> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM ledger_entries WHERE wallet_id = $1")
            .bind(wallet_id)
            .fetch_one(self.pool.as_ref())
            .await?
            .get("total");

        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, kind, amount, balance_after, note, created_at
            FROM ledger_entries
            WHERE wallet_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(wallet_id)
        .bind(request.page_size)
        .bind(request.offset())
        .fetch_all(self.pool.as_ref())
        .await?;

        let entries = rows
            .iter()
            .map(entry_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(entries, total, request))
    }

    /// Get the most recent bonus entry for a wallet, if any
    ///
    /// Used by the streak evaluator to decide whether the current loss
    /// streak has already been rewarded.
    pub async fn last_bonus_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
    ) -> WalletResult<Option<LedgerEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, wallet_id, kind, amount, balance_after, note, created_at
            FROM ledger_entries
            WHERE wallet_id = $1 AND kind = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(wallet_id)
        .bind(EntryKind::Bonus.to_string())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.as_ref().map(entry_from_row).transpose()?)
    }

    /// Verify the conservation law for a wallet
    ///
    /// Recomputes `initial_balance + sum(entries.amount)` and compares it
    /// against the stored balance, returning the balance when they agree.
    pub async fn reconcile(&self, wallet_id: WalletId) -> WalletResult<i64> {
        let row = sqlx::query(
            r#"
            SELECT w.balance, w.initial_balance,
                   COALESCE(SUM(e.amount), 0) AS ledger_sum
            FROM wallets w
            LEFT JOIN ledger_entries e ON e.wallet_id = w.id
            WHERE w.id = $1
            GROUP BY w.id
            "#,
        )
        .bind(wallet_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(WalletError::WalletNotFound(wallet_id))?;

        let balance: i64 = row.get("balance");
        let initial_balance: i64 = row.get("initial_balance");
        let ledger_sum: i64 = row.get("ledger_sum");
        let expected = initial_balance + ledger_sum;

        if balance != expected {
            log::warn!(
                "Wallet {wallet_id} out of balance: stored {balance}, ledger says {expected}"
            );
            return Err(WalletError::LedgerMismatch {
                wallet_id,
                balance,
                expected,
            });
        }

        Ok(balance)
    }
}

fn wallet_from_row(row: &sqlx::postgres::PgRow) -> Wallet {
    Wallet {
        id: row.get("id"),
        player_id: row.get("player_id"),
        balance: row.get("balance"),
        initial_balance: row.get("initial_balance"),
        currency: row.get("currency"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        updated_at: row.get::<chrono::NaiveDateTime, _>("updated_at").and_utc(),
    }
}

fn entry_from_row(row: &sqlx::postgres::PgRow) -> Result<LedgerEntry, sqlx::Error> {
    let kind = row.get::<String, _>("kind");
    let kind = EntryKind::from_db(&kind).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "kind".into(),
        source: format!("unrecognized entry kind {kind:?}").into(),
    })?;

    Ok(LedgerEntry {
        id: row.get("id"),
        wallet_id: row.get("wallet_id"),
        kind,
        amount: row.get("amount"),
        balance_after: row.get("balance_after"),
        note: row.get("note"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    })
}
