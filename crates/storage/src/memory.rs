//! In-memory storage implementation.
//!
//! Backs tests and the CLI's ephemeral mode. Same semantics as the JSON
//! backend, minus durability.

use std::collections::HashMap;

use hometrack_core::{DashboardId, DashboardSnapshot, DashboardStatus, User, UserId};

use super::{Credentials, DocumentStore, Result, StorageError};

/// HashMap-backed store.
#[derive(Default)]
pub struct MemoryStore {
    dashboards: HashMap<DashboardId, DashboardSnapshot>,
    users: HashMap<UserId, User>,
    credentials: HashMap<String, Credentials>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dashboards currently stored.
    pub fn dashboard_count(&self) -> usize {
        self.dashboards.len()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn save_dashboard(&mut self, dashboard: &DashboardSnapshot) -> Result<()> {
        self.dashboards.insert(dashboard.id, dashboard.clone());
        Ok(())
    }

    async fn load_dashboard(&self, id: DashboardId) -> Result<Option<DashboardSnapshot>> {
        Ok(self.dashboards.get(&id).cloned())
    }

    async fn list_dashboards_for(&self, user_id: UserId) -> Result<Vec<DashboardSnapshot>> {
        let mut dashboards: Vec<DashboardSnapshot> = self
            .dashboards
            .values()
            .filter(|d| d.is_member(user_id))
            .cloned()
            .collect();
        dashboards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(dashboards)
    }

    async fn delete_dashboard(&mut self, id: DashboardId) -> Result<()> {
        self.dashboards.remove(&id);
        Ok(())
    }

    async fn add_member(&mut self, id: DashboardId, user_id: UserId) -> Result<()> {
        let dashboard = self
            .dashboards
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("dashboard {id}")))?;
        dashboard.add_member(user_id);
        Ok(())
    }

    async fn set_status(&mut self, id: DashboardId, status: DashboardStatus) -> Result<()> {
        let dashboard = self
            .dashboards
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(format!("dashboard {id}")))?;
        dashboard.status = status;
        dashboard.touch();
        Ok(())
    }

    async fn save_user(&mut self, user: &User) -> Result<()> {
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn load_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        self.credentials
            .insert(credentials.email.to_lowercase(), credentials.clone());
        Ok(())
    }

    async fn load_credentials(&self, email: &str) -> Result<Option<Credentials>> {
        Ok(self.credentials.get(&email.to_lowercase()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hometrack_core::JourneyType;

    #[tokio::test]
    async fn save_load_delete() {
        let mut store = MemoryStore::new();
        let dashboard = DashboardSnapshot::new(
            "Memory",
            JourneyType::Buyer,
            UserId::new(),
            "Jo",
            "jo@x.com",
        );
        store.save_dashboard(&dashboard).await.unwrap();
        assert_eq!(store.dashboard_count(), 1);
        assert!(store.load_dashboard(dashboard.id).await.unwrap().is_some());
        store.delete_dashboard(dashboard.id).await.unwrap();
        assert_eq!(store.dashboard_count(), 0);
    }

    #[tokio::test]
    async fn set_status_on_missing_dashboard_errors() {
        let mut store = MemoryStore::new();
        let err = store
            .set_status(DashboardId::new(), DashboardStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
