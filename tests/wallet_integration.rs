//! Integration tests for player registration and wallet conservation.
//!
//! Requires a live PostgreSQL instance (`DATABASE_URL`); skipped otherwise.

mod common;

use serial_test::serial;
use wager_ledger::paging::PageRequest;
use wager_ledger::player::{PlayerError, PlayerManager, RegisterPlayerRequest};
use wager_ledger::wallet::{WalletError, WalletGuard};

use common::{register_player, setup_pool};

#[tokio::test]
#[serial]
async fn test_registration_creates_endowed_wallet() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let player = register_player(&pool, "register").await;
    let wallet_guard = WalletGuard::new(pool.clone());

    let wallet = wallet_guard
        .get_wallet_by_owner(player.id)
        .await
        .expect("wallet created with the player");
    assert_eq!(wallet.player_id, player.id);
    assert_eq!(wallet.balance, wallet.initial_balance);
    assert!(wallet.balance > 0, "wallet starts with an endowment");
    assert_eq!(wallet.currency, "BRL");

    // fresh wallet: empty ledger, conservation holds trivially
    let entries = wallet_guard
        .entries(wallet.id, PageRequest::default())
        .await
        .expect("entries query works");
    assert_eq!(entries.total, 0);
    let balance = wallet_guard
        .reconcile(wallet.id)
        .await
        .expect("ledger must reconcile");
    assert_eq!(balance, wallet.initial_balance);
}

#[tokio::test]
#[serial]
async fn test_duplicate_email_rejected() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let manager = PlayerManager::new(pool.clone());
    let player = register_player(&pool, "dup_email").await;

    let err = manager
        .register(RegisterPlayerRequest {
            display_name: "Someone else".to_string(),
            email: player.email.clone(),
            password_hash: "$test$not-a-real-hash".to_string(),
        })
        .await
        .expect_err("duplicate email must fail");
    assert!(matches!(err, PlayerError::EmailTaken));
}

#[tokio::test]
#[serial]
async fn test_registration_validates_input() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let manager = PlayerManager::new(pool.clone());

    let err = manager
        .register(RegisterPlayerRequest {
            display_name: "   ".to_string(),
            email: "valid@test.example".to_string(),
            password_hash: "$test$hash".to_string(),
        })
        .await
        .expect_err("blank name must fail");
    assert!(matches!(err, PlayerError::InvalidDisplayName));

    let err = manager
        .register(RegisterPlayerRequest {
            display_name: "Valid Name".to_string(),
            email: "not-an-email".to_string(),
            password_hash: "$test$hash".to_string(),
        })
        .await
        .expect_err("malformed email must fail");
    assert!(matches!(err, PlayerError::InvalidEmail));
}

#[tokio::test]
#[serial]
async fn test_profile_includes_balance() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let manager = PlayerManager::new(pool.clone());
    let player = register_player(&pool, "profile").await;

    let profile = manager.get_profile(player.id).await.expect("profile");
    assert_eq!(profile.id, player.id);
    assert_eq!(profile.email, player.email);
    assert!(profile.balance > 0);

    assert!(manager.exists(player.id).await.expect("exists query"));
    assert!(!manager.exists(i64::MAX).await.expect("exists query"));

    let err = manager
        .get_profile(i64::MAX)
        .await
        .expect_err("missing player must fail");
    assert!(matches!(err, PlayerError::PlayerNotFound(_)));
}

#[tokio::test]
#[serial]
async fn test_wallet_lookups_for_unknown_ids_fail() {
    let Some(pool) = setup_pool().await else {
        return;
    };
    let wallet_guard = WalletGuard::new(pool.clone());

    let err = wallet_guard
        .get_wallet(i64::MAX)
        .await
        .expect_err("missing wallet must fail");
    assert!(matches!(err, WalletError::WalletNotFound(_)));

    let err = wallet_guard
        .get_wallet_by_owner(i64::MAX)
        .await
        .expect_err("missing owner must fail");
    assert!(matches!(err, WalletError::WalletNotFoundForPlayer(_)));
    assert_eq!(err.client_message(), "Wallet not found");
}
