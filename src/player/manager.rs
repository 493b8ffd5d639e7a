//! Player manager implementation.

use super::{
    errors::{PlayerError, PlayerResult},
    models::{Player, PlayerProfile, RegisterPlayerRequest},
};
use crate::wallet::PlayerId;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// Maximum display name length accepted at registration
const MAX_DISPLAY_NAME_LEN: usize = 100;

/// Player manager
#[derive(Clone)]
pub struct PlayerManager {
    pool: Arc<PgPool>,
    initial_balance: i64,
    currency: String,
}

impl PlayerManager {
    /// Create a new player manager
    ///
    /// The initial wallet endowment can be overridden with the
    /// `INITIAL_WALLET_BALANCE` environment variable (in cents,
    /// default 100000 == 1000.00).
    pub fn new(pool: Arc<PgPool>) -> Self {
        let initial_balance = std::env::var("INITIAL_WALLET_BALANCE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100_000);

        Self {
            pool,
            initial_balance,
            currency: "BRL".to_string(),
        }
    }

    /// Register a new player
    ///
    /// The player row and its wallet are created in one transaction, so a
    /// player without a wallet is never observable. The wallet starts at
    /// the configured endowment with an empty ledger.
    ///
    /// # Errors
    ///
    /// * `PlayerError::EmailTaken` - Email already registered
    /// * `PlayerError::InvalidDisplayName` - Name empty or too long
    /// * `PlayerError::InvalidEmail` - Email fails the shape check
    pub async fn register(&self, request: RegisterPlayerRequest) -> PlayerResult<Player> {
        let display_name = request.display_name.trim();
        if display_name.is_empty() || display_name.len() > MAX_DISPLAY_NAME_LEN {
            return Err(PlayerError::InvalidDisplayName);
        }
        if !request.email.contains('@') || request.email.len() > 150 {
            return Err(PlayerError::InvalidEmail);
        }

        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM players WHERE email = $1")
            .bind(&request.email)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(PlayerError::EmailTaken);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO players (display_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, display_name, email, created_at
            "#,
        )
        .bind(display_name)
        .bind(&request.email)
        .bind(&request.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let player = Player {
            id: row.get("id"),
            display_name: row.get("display_name"),
            email: row.get("email"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        };

        sqlx::query(
            "INSERT INTO wallets (player_id, balance, initial_balance, currency)
             VALUES ($1, $2, $2, $3)",
        )
        .bind(player.id)
        .bind(self.initial_balance)
        .bind(&self.currency)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        log::info!("Registered player {} with wallet", player.id);

        Ok(player)
    }

    /// Get a player by ID
    pub async fn get_player(&self, player_id: PlayerId) -> PlayerResult<Player> {
        let row = sqlx::query(
            "SELECT id, display_name, email, created_at FROM players WHERE id = $1",
        )
        .bind(player_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(PlayerError::PlayerNotFound(player_id))?;

        Ok(Player {
            id: row.get("id"),
            display_name: row.get("display_name"),
            email: row.get("email"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        })
    }

    /// Check whether a player exists
    pub async fn exists(&self, player_id: PlayerId) -> PlayerResult<bool> {
        let row = sqlx::query("SELECT 1 AS one FROM players WHERE id = $1")
            .bind(player_id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.is_some())
    }

    /// Get a player profile with the current wallet balance
    pub async fn get_profile(&self, player_id: PlayerId) -> PlayerResult<PlayerProfile> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.display_name, p.email, p.created_at,
                   w.balance, w.currency
            FROM players p
            JOIN wallets w ON w.player_id = p.id
            WHERE p.id = $1
            "#,
        )
        .bind(player_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(PlayerError::PlayerNotFound(player_id))?;

        Ok(PlayerProfile {
            id: row.get("id"),
            display_name: row.get("display_name"),
            email: row.get("email"),
            balance: row.get("balance"),
            currency: row.get("currency"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        })
    }
}
