//! Progress derivation.
//!
//! Completed-step membership and the weighted overall percentage, derived
//! from checklist state.

#![warn(missing_docs)]

pub mod calculator;

pub use calculator::{completed_steps, is_step_complete, overall_progress};
