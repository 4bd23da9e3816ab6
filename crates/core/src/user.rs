//! User model - agents and the clients they invite.

use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::Time;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Sign-in email, unique across users
    pub email: String,

    /// Display name
    pub name: String,

    /// Agent or client
    pub role: UserRole,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

/// What a user can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Creates dashboards and invites clients
    Agent,
    /// Joins dashboards by invitation
    Client,
}

impl UserRole {
    /// Stable lowercase name, matching the persisted document value.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Agent => "agent",
            UserRole::Client => "client",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
