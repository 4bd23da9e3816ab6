//! Journey orchestration.
//!
//! [`DashboardSession`] owns a dashboard's mutable state for one signed-in
//! user, keeps derived progress in sync with every mutation, and persists
//! full snapshots through a debounced save.

#![warn(missing_docs)]

mod session;

pub use session::{DashboardSession, DEFAULT_DEBOUNCE};
