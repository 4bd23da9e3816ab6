//! JSON file storage implementation.
//!
//! Stores each document as a pretty-printed JSON file under a root
//! directory, one subdirectory per collection. Good enough for a single
//! host; the trait exists so a real document database can slot in behind
//! the same calls.

use std::path::{Path, PathBuf};

use hometrack_core::{DashboardId, DashboardSnapshot, DashboardStatus, User, UserId};
use tokio::fs;

use super::{Credentials, DocumentStore, Result, StorageError};

/// File-based JSON storage backend.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create storage rooted at `root`, creating the collection
    /// directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("dashboards")).await?;
        fs::create_dir_all(root.join("users")).await?;
        fs::create_dir_all(root.join("credentials")).await?;

        Ok(Self { root })
    }

    fn dashboard_path(&self, id: DashboardId) -> PathBuf {
        self.root.join("dashboards").join(format!("{}.json", id))
    }

    fn user_path(&self, id: UserId) -> PathBuf {
        self.root.join("users").join(format!("{}.json", id))
    }

    fn credentials_path(&self, email: &str) -> PathBuf {
        self.root
            .join("credentials")
            .join(format!("{}.json", email.to_lowercase()))
    }

    async fn load_dashboard_or_missing(&self, id: DashboardId) -> Result<DashboardSnapshot> {
        read_json(&self.dashboard_path(id))
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("dashboard {id}")))
    }
}

#[async_trait::async_trait]
impl DocumentStore for JsonStore {
    async fn save_dashboard(&mut self, dashboard: &DashboardSnapshot) -> Result<()> {
        write_json(&self.dashboard_path(dashboard.id), dashboard).await
    }

    async fn load_dashboard(&self, id: DashboardId) -> Result<Option<DashboardSnapshot>> {
        read_json(&self.dashboard_path(id)).await
    }

    async fn list_dashboards_for(&self, user_id: UserId) -> Result<Vec<DashboardSnapshot>> {
        let all: Vec<DashboardSnapshot> = list_dir(&self.root.join("dashboards")).await?;
        let mut dashboards: Vec<DashboardSnapshot> = all
            .into_iter()
            .filter(|d| d.is_member(user_id))
            .collect();
        dashboards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(dashboards)
    }

    async fn delete_dashboard(&mut self, id: DashboardId) -> Result<()> {
        fs::remove_file(self.dashboard_path(id)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Ok(())
            } else {
                Err(e)
            }
        })?;
        Ok(())
    }

    async fn add_member(&mut self, id: DashboardId, user_id: UserId) -> Result<()> {
        let mut dashboard = self.load_dashboard_or_missing(id).await?;
        dashboard.add_member(user_id);
        self.save_dashboard(&dashboard).await
    }

    async fn set_status(&mut self, id: DashboardId, status: DashboardStatus) -> Result<()> {
        let mut dashboard = self.load_dashboard_or_missing(id).await?;
        dashboard.status = status;
        dashboard.touch();
        self.save_dashboard(&dashboard).await
    }

    async fn save_user(&mut self, user: &User) -> Result<()> {
        write_json(&self.user_path(user.id), user).await
    }

    async fn load_user(&self, id: UserId) -> Result<Option<User>> {
        read_json(&self.user_path(id)).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users: Vec<User> = list_dir(&self.root.join("users")).await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn save_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        write_json(&self.credentials_path(&credentials.email), credentials).await
    }

    async fn load_credentials(&self, email: &str) -> Result<Option<Credentials>> {
        read_json(&self.credentials_path(email)).await
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "skipping unreadable document");
            }
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hometrack_core::{JourneyType, UserRole};

    fn test_user(email: &str) -> User {
        let now = chrono::Utc::now();
        User {
            id: UserId::new(),
            email: email.to_string(),
            name: "Test Agent".to_string(),
            role: UserRole::Agent,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn dashboard_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let owner = UserId::new();
        let dashboard =
            DashboardSnapshot::new("Round trip", JourneyType::Buyer, owner, "Jo", "jo@x.com");
        store.save_dashboard(&dashboard).await.unwrap();

        let loaded = store.load_dashboard(dashboard.id).await.unwrap().unwrap();
        assert_eq!(loaded, dashboard);
    }

    #[tokio::test]
    async fn missing_dashboard_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        assert!(store.load_dashboard(DashboardId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn membership_query_filters_and_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let agent = UserId::new();
        let other_agent = UserId::new();

        let mut first =
            DashboardSnapshot::new("First", JourneyType::Buyer, agent, "A", "a@x.com");
        first.created_at = chrono::Utc::now() - chrono::Duration::hours(2);
        let second = DashboardSnapshot::new("Second", JourneyType::Seller, agent, "B", "b@x.com");
        let foreign =
            DashboardSnapshot::new("Foreign", JourneyType::Buyer, other_agent, "C", "c@x.com");

        store.save_dashboard(&first).await.unwrap();
        store.save_dashboard(&second).await.unwrap();
        store.save_dashboard(&foreign).await.unwrap();

        let listed = store.list_dashboards_for(agent).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Second");
        assert_eq!(listed[1].title, "First");
    }

    #[tokio::test]
    async fn add_member_and_set_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let owner = UserId::new();
        let client = UserId::new();
        let dashboard =
            DashboardSnapshot::new("Invite", JourneyType::Buyer, owner, "Jo", "jo@x.com");
        store.save_dashboard(&dashboard).await.unwrap();

        store.add_member(dashboard.id, client).await.unwrap();
        store
            .set_status(dashboard.id, DashboardStatus::Active)
            .await
            .unwrap();

        let loaded = store.load_dashboard(dashboard.id).await.unwrap().unwrap();
        assert!(loaded.is_member(client));
        assert_eq!(loaded.status, DashboardStatus::Active);
    }

    #[tokio::test]
    async fn add_member_to_missing_dashboard_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();
        let err = store
            .add_member(DashboardId::new(), UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn user_lookup_by_email_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let user = test_user("Agent@Example.com");
        store.save_user(&user).await.unwrap();

        let found = store.find_user_by_email("agent@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn credentials_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let credentials = Credentials {
            email: "agent@example.com".to_string(),
            user_id: UserId::new(),
            password_hash: "$argon2id$stub".to_string(),
        };
        store.save_credentials(&credentials).await.unwrap();

        let loaded = store
            .load_credentials("Agent@Example.COM")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.user_id, credentials.user_id);
    }

    #[tokio::test]
    async fn delete_dashboard_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let dashboard = DashboardSnapshot::new(
            "Doomed",
            JourneyType::Seller,
            UserId::new(),
            "Jo",
            "jo@x.com",
        );
        store.save_dashboard(&dashboard).await.unwrap();
        store.delete_dashboard(dashboard.id).await.unwrap();
        store.delete_dashboard(dashboard.id).await.unwrap();
        assert!(store.load_dashboard(dashboard.id).await.unwrap().is_none());
    }
}
