//! Identity provider - registration, sign-in, and the acting user.

use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::sync::Mutex;

use hometrack_core::{DashboardId, DashboardStatus, User, UserId, UserRole};
use hometrack_storage::{Credentials, DocumentStore};

use crate::error::{AuthError, AuthResult};
use crate::password::{hash_password, verify_password};

const MIN_PASSWORD_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Whether a string looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Identity service consumed by the session and CLI layers.
///
/// The provider authenticates; it does not authorize. Dashboard access is
/// membership-based and checked where dashboards are opened.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new agent and sign them in.
    async fn register_agent(&mut self, email: &str, password: &str, name: &str)
        -> AuthResult<User>;

    /// Register a new client and sign them in. Registering through an
    /// invitation joins the dashboard and activates it.
    async fn register_client(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        invitation: Option<DashboardId>,
    ) -> AuthResult<User>;

    /// Sign in an existing user (agent or client).
    async fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<User>;

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserId>;

    /// Forget the signed-in user.
    fn sign_out(&mut self);
}

/// Identity provider backed by the document store: user documents plus a
/// separate credentials collection holding argon2id hashes.
pub struct StoreBackedIdentity<S: DocumentStore> {
    store: Arc<Mutex<S>>,
    current: Option<UserId>,
}

impl<S: DocumentStore> StoreBackedIdentity<S> {
    /// Create a provider over a shared store handle.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Restore a previously-established session without re-checking the
    /// password (e.g. from a CLI session file).
    pub async fn restore_session(&mut self, user_id: UserId) -> AuthResult<User> {
        let user = self
            .store
            .lock()
            .await
            .load_user(user_id)
            .await?
            .ok_or(AuthError::MissingUserRecord)?;
        self.current = Some(user.id);
        Ok(user)
    }

    async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
    ) -> AuthResult<User> {
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let mut store = self.store.lock().await;
        if store.find_user_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let now = chrono::Utc::now();
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            created_at: now,
            updated_at: now,
        };
        let credentials = Credentials {
            email: email.to_lowercase(),
            user_id: user.id,
            password_hash: hash_password(password)?,
        };

        store.save_user(&user).await?;
        store.save_credentials(&credentials).await?;
        drop(store);

        self.current = Some(user.id);
        tracing::info!(user = %user.id, role = %role, "registered user");
        Ok(user)
    }
}

#[async_trait]
impl<S: DocumentStore + 'static> IdentityProvider for StoreBackedIdentity<S> {
    async fn register_agent(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> AuthResult<User> {
        self.register(email, password, name, UserRole::Agent).await
    }

    async fn register_client(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        invitation: Option<DashboardId>,
    ) -> AuthResult<User> {
        let user = self.register(email, password, name, UserRole::Client).await?;

        if let Some(dashboard_id) = invitation {
            let mut store = self.store.lock().await;
            store.add_member(dashboard_id, user.id).await?;
            store
                .set_status(dashboard_id, DashboardStatus::Active)
                .await?;
            tracing::info!(user = %user.id, dashboard = %dashboard_id, "client joined via invitation");
        }

        Ok(user)
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<User> {
        let store = self.store.lock().await;
        let credentials = store
            .load_credentials(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthError::WrongPassword);
        }

        let user = store
            .load_user(credentials.user_id)
            .await?
            .ok_or(AuthError::MissingUserRecord)?;
        drop(store);

        self.current = Some(user.id);
        Ok(user)
    }

    fn current_user(&self) -> Option<UserId> {
        self.current
    }

    fn sign_out(&mut self) {
        self.current = None;
    }
}
