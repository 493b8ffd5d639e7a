//! Player data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wallet::PlayerId;

/// Player model
///
/// The credential is stored as an opaque hash; hashing and session
/// handling live at the service boundary, not in the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPlayerRequest {
    pub display_name: String,
    pub email: String,
    /// Pre-hashed credential; never interpreted by the engine
    pub password_hash: String,
}

/// Player profile with the wallet balance attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub display_name: String,
    pub email: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}
