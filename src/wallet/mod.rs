//! Wallet module providing balance management with an append-only ledger.
//!
//! This module implements:
//! - The wallet guard, the only sanctioned debit/credit path
//! - An append-only ledger of every balance change
//! - Atomic conditional debits (no read-then-write overdraft race)
//! - Conservation auditing (`balance == initial_balance + sum(entries)`)
//!
//! ## Example
//!
//! ```no_run
//! use wager_ledger::db::{Database, DatabaseConfig};
//! use wager_ledger::paging::PageRequest;
//! use wager_ledger::wallet::WalletGuard;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let guard = WalletGuard::new(Arc::new(db.pool().clone()));
//!
//!     let wallet = guard.get_wallet_by_owner(1).await?;
//!     let history = guard.entries(wallet.id, PageRequest::default()).await?;
//!     println!("{} entries, balance {}", history.total, wallet.balance);
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod guard;
pub mod models;

pub use errors::{WalletError, WalletResult};
pub use guard::WalletGuard;
pub use models::{CURRENCY_UNIT, EntryKind, LedgerEntry, PlayerId, Wallet, WalletId};
