//! Betting module: bet lifecycle, outcome resolution, and streak bonuses.
//!
//! The state machine is `Active -> {Won, Lost} -> (optional) Cancelled`,
//! or `Active -> Cancelled` directly. Placement resolves the bet in the
//! same transaction, so callers never observe an Active bet; cancellation
//! reverses the recorded wallet effects and restores the balance the
//! wallet had immediately before the bet was placed.
//!
//! ## Example
//!
//! ```no_run
//! use wager_ledger::betting::BetController;
//! use wager_ledger::db::{Database, DatabaseConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let bets = BetController::new(Arc::new(db.pool().clone()));
//!
//!     let bet = bets.place_bet(1, 2_000).await?;
//!     println!("Bet {} settled as {}", bet.id, bet.status);
//!
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod errors;
pub mod models;
pub mod resolver;
pub mod streak;

pub use controller::BetController;
pub use errors::{BetError, BetResult, ErrorKind};
pub use models::{Bet, BetId, BetStatus, MIN_STAKE};
pub use resolver::{
    Outcome, OutcomeResolver, PAYOUT_MULTIPLIER, RandomSource, ScriptedRandom, SeededRandom,
    ThreadRandom, WIN_PROBABILITY,
};
pub use streak::{BONUS_RATE_PERCENT, STREAK_LENGTH, StreakBonusEvaluator};
