//! Dashboard aggregate - the persisted snapshot of one client journey.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::checklist::{
    final_walkthrough_defaults, moving_day_defaults, ChecklistEntry, ChecklistState,
};
use crate::id::{DashboardId, UserId};
use crate::journey::JourneyType;
use crate::profile::{ClientProfile, SellerProfile};
use crate::record::{
    CriticalDateRecord, DiligenceTaskRecord, DocumentLinkRecord, OfferActivityRecord,
    PropertyRecord, ReceivedOfferRecord, RepairRequestRecord, UtilityTransferRecord,
};
use crate::Time;

/// Lifecycle of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    /// Created, client has not accepted the invitation yet
    PendingInvitation,
    /// Client joined; both parties are working the journey
    Active,
    /// Transaction finished or abandoned
    Archived,
}

/// Client and agent notes for one journey section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionNotes {
    pub client_notes: String,
    pub agent_notes: String,
}

/// Derived progress values, persisted alongside the raw checklist state.
///
/// `completed_steps` and `overall_progress` are caches of a pure
/// derivation over `checked_items`; they are rewritten on every mutation
/// and never treated as a source of truth when loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressData {
    /// Step ids whose checklist is fully checked
    pub completed_steps: Vec<usize>,

    /// Raw per-item state
    pub checked_items: ChecklistState,

    /// Weighted percentage, 0..=100
    pub overall_progress: u8,
}

/// The full persisted state of one dashboard.
///
/// Saved and loaded as a single document; concurrent writers are
/// last-write-wins at this granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Unique identifier
    pub id: DashboardId,

    /// Display title, e.g. "The Nguyen Purchase"
    pub title: String,

    /// Agent who created the dashboard
    pub owner_id: UserId,

    /// Everyone with access (owner plus joined clients)
    pub members: Vec<UserId>,

    /// Buyer or seller journey
    #[serde(rename = "type")]
    pub journey: JourneyType,

    /// Lifecycle status
    pub status: DashboardStatus,

    /// Client name entered at creation, before the client registers
    #[serde(default)]
    pub client_name: String,

    /// Invitation email entered at creation
    #[serde(default)]
    pub client_email: String,

    /// Buyer intake data, present once the form is submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_data: Option<ClientProfile>,

    /// Seller intake data, present once the form is submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_data: Option<SellerProfile>,

    /// Signed representation/listing agreement link
    #[serde(default)]
    pub agreement_url: String,

    /// Per-section notes, keyed by journey section name
    #[serde(default)]
    pub notes: BTreeMap<String, SectionNotes>,

    /// Properties the client found
    #[serde(default)]
    pub client_properties: Vec<PropertyRecord>,

    /// Properties the agent suggested
    #[serde(default)]
    pub agent_properties: Vec<PropertyRecord>,

    /// Buyer offer tracker rows
    #[serde(default)]
    pub offer_track_items: Vec<OfferActivityRecord>,

    /// Due-diligence tasks
    #[serde(default)]
    pub diligence_tasks: Vec<DiligenceTaskRecord>,

    /// Repair requests
    #[serde(default)]
    pub repair_request_items: Vec<RepairRequestRecord>,

    /// Contract deadlines
    #[serde(default)]
    pub critical_dates: Vec<CriticalDateRecord>,

    /// Document hub links
    #[serde(default)]
    pub document_hub_links: Vec<DocumentLinkRecord>,

    /// Utility transfers
    #[serde(default)]
    pub utility_transfer_items: Vec<UtilityTransferRecord>,

    /// Offers received (seller journey)
    #[serde(default)]
    pub offers: Vec<ReceivedOfferRecord>,

    /// Final-walkthrough checklist
    #[serde(default)]
    pub final_walkthrough_items: Vec<ChecklistEntry>,

    /// Moving-day checklist
    #[serde(default)]
    pub moving_day_tasks: Vec<ChecklistEntry>,

    /// Checklist state plus derived completion caches
    #[serde(default)]
    pub progress_data: ProgressData,

    /// Duplicate of `progress_data.overall_progress` kept at the top
    /// level so list queries can render progress without the nested blob
    pub progress: u8,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl DashboardSnapshot {
    /// Fresh dashboard for a newly-invited client.
    pub fn new(
        title: impl Into<String>,
        journey: JourneyType,
        owner_id: UserId,
        client_name: impl Into<String>,
        client_email: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: DashboardId::new(),
            title: title.into(),
            owner_id,
            members: vec![owner_id],
            journey,
            status: DashboardStatus::PendingInvitation,
            client_name: client_name.into(),
            client_email: client_email.into(),
            client_data: None,
            seller_data: None,
            agreement_url: String::new(),
            notes: BTreeMap::new(),
            client_properties: Vec::new(),
            agent_properties: Vec::new(),
            offer_track_items: Vec::new(),
            diligence_tasks: Vec::new(),
            repair_request_items: Vec::new(),
            critical_dates: Vec::new(),
            document_hub_links: Vec::new(),
            utility_transfer_items: Vec::new(),
            offers: Vec::new(),
            final_walkthrough_items: final_walkthrough_defaults(),
            moving_day_tasks: moving_day_defaults(),
            progress_data: ProgressData::default(),
            progress: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a user may read and edit this dashboard.
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    /// Add a member if not already present, bumping `updated_at`.
    pub fn add_member(&mut self, user_id: UserId) {
        if !self.members.contains(&user_id) {
            self.members.push(user_id);
            self.touch();
        }
    }

    /// Bump the `updated_at` stamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}
