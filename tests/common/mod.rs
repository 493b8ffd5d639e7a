//! Shared helpers for database-backed integration tests.
//!
//! These tests need a live PostgreSQL instance; they skip cleanly when
//! `DATABASE_URL` is not set.

use sqlx::PgPool;
use std::sync::Arc;
use wager_ledger::db::{Database, DatabaseConfig};
use wager_ledger::player::{Player, PlayerManager, RegisterPlayerRequest};

/// Connect to the test database and apply the schema, or `None` when no
/// database is configured
pub async fn setup_pool() -> Option<Arc<PgPool>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };

    let config = DatabaseConfig {
        database_url,
        max_connections: 16,
        min_connections: 1,
        connection_timeout_secs: 5,
        idle_timeout_secs: 300,
        max_lifetime_secs: 1800,
    };

    let db = Database::new(&config)
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to apply schema");

    Some(Arc::new(db.pool().clone()))
}

/// Register a player with a unique email
pub async fn register_player(pool: &Arc<PgPool>, prefix: &str) -> Player {
    let manager = PlayerManager::new(pool.clone());
    let nonce = chrono::Utc::now()
        .timestamp_nanos_opt()
        .expect("timestamp in range");

    manager
        .register(RegisterPlayerRequest {
            display_name: format!("{prefix} player"),
            email: format!("{prefix}_{nonce}@test.example"),
            password_hash: "$test$not-a-real-hash".to_string(),
        })
        .await
        .expect("Registration should succeed")
}
