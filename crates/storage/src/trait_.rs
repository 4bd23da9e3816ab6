//! Document store trait abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use hometrack_core::{DashboardId, DashboardSnapshot, DashboardStatus, User, UserId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Sign-in secret for one user, stored separately from the user document.
///
/// Only the PHC-formatted hash is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Sign-in email, lowercased
    pub email: String,

    /// The user these credentials belong to
    pub user_id: UserId,

    /// Argon2id PHC hash string
    pub password_hash: String,
}

/// Document store abstraction for hometrack data.
///
/// Writes are full-document upserts: the caller always sends the complete
/// snapshot it cares about, and concurrent writers are last-write-wins.
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // === Dashboard operations ===

    /// Save a dashboard snapshot (create or update, full document).
    async fn save_dashboard(&mut self, dashboard: &DashboardSnapshot) -> Result<()>;

    /// Load a dashboard by ID.
    async fn load_dashboard(&self, id: DashboardId) -> Result<Option<DashboardSnapshot>>;

    /// List dashboards the user is a member of, newest first.
    async fn list_dashboards_for(&self, user_id: UserId) -> Result<Vec<DashboardSnapshot>>;

    /// Delete a dashboard. Deleting a missing dashboard is not an error.
    async fn delete_dashboard(&mut self, id: DashboardId) -> Result<()>;

    /// Add a member to a dashboard (set semantics) and bump its
    /// `updated_at`.
    async fn add_member(&mut self, id: DashboardId, user_id: UserId) -> Result<()>;

    /// Update a dashboard's lifecycle status.
    async fn set_status(&mut self, id: DashboardId, status: DashboardStatus) -> Result<()>;

    // === User operations ===

    /// Save a user (create or update).
    async fn save_user(&mut self, user: &User) -> Result<()>;

    /// Load a user by ID.
    async fn load_user(&self, id: UserId) -> Result<Option<User>>;

    /// Find a user by sign-in email (case-insensitive).
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // === Credential operations ===

    /// Save sign-in credentials.
    async fn save_credentials(&mut self, credentials: &Credentials) -> Result<()>;

    /// Load sign-in credentials by email (case-insensitive).
    async fn load_credentials(&self, email: &str) -> Result<Option<Credentials>>;
}
