//! hometrack core data models.
//!
//! This crate defines the document shapes shared by the storage, session,
//! and identity layers: journey definitions, checklist state, tracked
//! records, intake profiles, users, and the dashboard aggregate.

#![warn(missing_docs)]

// Core identities
mod id;

// Journey structure
mod journey;
mod checklist;

// Dashboard content
mod record;
mod profile;
mod dashboard;

// People
mod user;

// Re-exports
pub use id::{DashboardId, RecordId, UserId};

// Journey & checklists
pub use journey::{checklist, note_sections, steps, JourneyType, StepDef, UnknownJourney};
pub use checklist::{
    final_walkthrough_defaults, moving_day_defaults, ChecklistEntry, ChecklistState,
    FixedChecklist,
};

// Records
pub use record::{
    CriticalDateRecord, DiligenceTaskRecord, DocumentLinkRecord, OfferActivityRecord,
    PropertyRecord, PropertyScorecard, ReceivedOfferRecord, RecordListKind, RepairRequestRecord,
    TrackedRecord, UtilityTransferRecord,
};

// Profiles & dashboard
pub use profile::{ClientProfile, SellerProfile};
pub use dashboard::{DashboardSnapshot, DashboardStatus, ProgressData, SectionNotes};

// People
pub use user::{User, UserRole};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
