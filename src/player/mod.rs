//! Player module providing registration and profile lookups.
//!
//! Registration creates the player and its wallet atomically; the engine
//! never interprets credentials, it stores the hash the boundary provides.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{PlayerError, PlayerResult};
pub use manager::PlayerManager;
pub use models::{Player, PlayerProfile, RegisterPlayerRequest};
