//! Authentication error taxonomy.
//!
//! Every variant's message is user-facing; callers can surface
//! `to_string()` directly.

use hometrack_storage::StorageError;

/// Result type for identity operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during registration and sign-in.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email failed the format check
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Password shorter than the minimum
    #[error("Your password must be at least 6 characters long.")]
    WeakPassword,

    /// Another account already uses this email
    #[error("An account with this email already exists. Please sign in or use a different email.")]
    EmailAlreadyInUse,

    /// No account for this email
    #[error("No account found with this email address. Please check your email or register.")]
    UserNotFound,

    /// Password did not match
    #[error("Incorrect email or password. Please check your credentials and try again.")]
    WrongPassword,

    /// Credentials exist but the user document is gone
    #[error("User data not found in the database. Please contact support.")]
    MissingUserRecord,

    /// Password hashing/verification failed
    #[error("An unexpected authentication error occurred.")]
    Hash(String),

    /// Underlying storage failure
    #[error("Network error. Please check your connection and try again.")]
    Storage(#[from] StorageError),
}
