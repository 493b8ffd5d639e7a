//! # Wager Ledger
//!
//! A wagering and ledger engine: players stake funds from a wallet, an
//! outcome is resolved, and the wallet is credited or the stake forfeited,
//! with every balance change recorded as an immutable ledger entry.
//!
//! ## Architecture
//!
//! The engine is composed of four parts layered over a PostgreSQL store:
//!
//! - **Wallet guard**: the only sanctioned debit/credit path; keeps
//!   `balance == initial_balance + sum(ledger entries)` for every wallet
//! - **Outcome resolver**: a fixed-probability draw (p = 0.30, prize = 2x)
//!   over an injectable random source
//! - **Streak bonus evaluator**: awards a one-time bonus per streak of
//!   five consecutive losing bets
//! - **Bet lifecycle controller**: composes the above into atomic
//!   place/resolve/cancel workflows
//!
//! Each logical operation runs as a single database transaction; balance
//! checks use conditional updates rather than read-then-write, so
//! concurrent placements cannot overdraw a wallet.
//!
//! ## Core Modules
//!
//! - [`betting`]: bet lifecycle, outcome resolution, streak bonuses
//! - [`wallet`]: wallet guard and the append-only ledger
//! - [`player`]: registration and profile lookups
//! - [`db`]: connection pooling and schema bootstrap

pub mod db;
pub use db::{Database, DatabaseConfig};

pub mod wallet;
pub use wallet::{EntryKind, LedgerEntry, Wallet, WalletError, WalletGuard};

pub mod player;
pub use player::{Player, PlayerError, PlayerManager, RegisterPlayerRequest};

pub mod betting;
pub use betting::{Bet, BetController, BetError, BetStatus, ErrorKind, MIN_STAKE};

pub mod paging;
pub use paging::{Page, PageRequest};
