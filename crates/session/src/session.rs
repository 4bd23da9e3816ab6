//! Dashboard session - owns one dashboard's state for a signed-in user.
//!
//! The session is the only writer of its snapshot: the UI (or CLI) calls
//! mutation methods, the session re-derives completion and progress
//! synchronously, and a debounced background save pushes the full
//! snapshot to the document store once the burst of edits quiets down.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use hometrack_core::{
    ChecklistEntry, ClientProfile, DashboardId, DashboardSnapshot, FixedChecklist, JourneyType,
    RecordId, SellerProfile, TrackedRecord, UserId,
};
use hometrack_progress::{completed_steps, overall_progress};
use hometrack_storage::DocumentStore;

/// Default quiet period before a save fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// A live editing session over one dashboard.
///
/// In-memory state is authoritative for the session's lifetime: a failed
/// save is logged and does not roll anything back. Persistence is
/// last-write-wins at full-snapshot granularity; a pending debounced
/// write is abandoned when the session is dropped (call [`flush`] to
/// force it out first).
///
/// [`flush`]: DashboardSession::flush
pub struct DashboardSession<S: DocumentStore + 'static> {
    store: Arc<Mutex<S>>,
    acting_user: UserId,
    snapshot: DashboardSnapshot,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<S: DocumentStore + 'static> DashboardSession<S> {
    /// Open an existing dashboard for a member user.
    pub async fn open(
        store: Arc<Mutex<S>>,
        dashboard_id: DashboardId,
        acting_user: UserId,
    ) -> Result<Self> {
        let snapshot = store
            .lock()
            .await
            .load_dashboard(dashboard_id)
            .await
            .context("loading dashboard")?
            .ok_or_else(|| anyhow!("Dashboard not found"))?;

        if !snapshot.is_member(acting_user) {
            return Err(anyhow!("User is not a member of this dashboard"));
        }

        Ok(Self {
            store,
            acting_user,
            snapshot,
            debounce: DEFAULT_DEBOUNCE,
            pending: None,
        })
    }

    /// Create a new dashboard owned by `acting_user`, persist it
    /// immediately, and open a session over it.
    pub async fn create(
        store: Arc<Mutex<S>>,
        acting_user: UserId,
        title: impl Into<String>,
        journey: JourneyType,
        client_name: impl Into<String>,
        client_email: impl Into<String>,
    ) -> Result<Self> {
        let snapshot =
            DashboardSnapshot::new(title, journey, acting_user, client_name, client_email);
        store
            .lock()
            .await
            .save_dashboard(&snapshot)
            .await
            .context("saving new dashboard")?;
        tracing::info!(dashboard = %snapshot.id, owner = %acting_user, "created dashboard");

        Ok(Self {
            store,
            acting_user,
            snapshot,
            debounce: DEFAULT_DEBOUNCE,
            pending: None,
        })
    }

    /// Override the debounce quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// The dashboard as this session sees it.
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    /// The user this session acts as.
    pub fn acting_user(&self) -> UserId {
        self.acting_user
    }

    /// Current weighted progress percentage.
    pub fn progress(&self) -> u8 {
        self.snapshot.progress
    }

    /// Step ids whose checklist is fully checked.
    pub fn completed_steps(&self) -> &[usize] {
        &self.snapshot.progress_data.completed_steps
    }

    // === Mutations ===
    //
    // Every mutation re-derives completion synchronously and schedules a
    // debounced save; there is never a window where the snapshot's
    // derived fields disagree with its checklist state.

    /// Flip one weighted-checklist item; returns the new value.
    pub fn toggle_checklist_item(&mut self, step_id: usize, item_index: usize) -> bool {
        let checked = self
            .snapshot
            .progress_data
            .checked_items
            .toggle(step_id, item_index);
        self.after_mutation();
        checked
    }

    /// Append a record to the list its variant selects, assigning a
    /// fresh id. Returns the id.
    pub fn add_record(&mut self, mut record: TrackedRecord) -> RecordId {
        let id = RecordId::new();
        record.assign_id(id);
        tracing::debug!(dashboard = %self.snapshot.id, list = record.list_kind().as_str(), "adding record");
        match record {
            TrackedRecord::ClientProperty(r) => self.snapshot.client_properties.push(r),
            TrackedRecord::AgentProperty(r) => self.snapshot.agent_properties.push(r),
            TrackedRecord::OfferActivity(r) => self.snapshot.offer_track_items.push(r),
            TrackedRecord::DiligenceTask(r) => self.snapshot.diligence_tasks.push(r),
            TrackedRecord::RepairRequest(r) => self.snapshot.repair_request_items.push(r),
            TrackedRecord::CriticalDate(r) => self.snapshot.critical_dates.push(r),
            TrackedRecord::DocumentLink(r) => self.snapshot.document_hub_links.push(r),
            TrackedRecord::UtilityTransfer(r) => self.snapshot.utility_transfer_items.push(r),
            TrackedRecord::ReceivedOffer(r) => self.snapshot.offers.push(r),
        }
        self.after_mutation();
        id
    }

    /// Flip a `checked` flag on one of the fixed checklists. An
    /// out-of-range index is a no-op.
    pub fn toggle_fixed_item(&mut self, list: FixedChecklist, index: usize) {
        let items: &mut Vec<ChecklistEntry> = match list {
            FixedChecklist::FinalWalkthrough => &mut self.snapshot.final_walkthrough_items,
            FixedChecklist::MovingDay => &mut self.snapshot.moving_day_tasks,
        };
        if let Some(entry) = items.get_mut(index) {
            entry.checked = !entry.checked;
            self.after_mutation();
        }
    }

    /// Replace the client's notes for a section.
    pub fn set_client_notes(&mut self, section: &str, text: impl Into<String>) {
        self.snapshot
            .notes
            .entry(section.to_string())
            .or_default()
            .client_notes = text.into();
        self.after_mutation();
    }

    /// Replace the agent's notes for a section.
    pub fn set_agent_notes(&mut self, section: &str, text: impl Into<String>) {
        self.snapshot
            .notes
            .entry(section.to_string())
            .or_default()
            .agent_notes = text.into();
        self.after_mutation();
    }

    /// Store the submitted buyer intake form.
    pub fn set_client_profile(&mut self, profile: ClientProfile) {
        self.snapshot.client_data = Some(profile);
        self.after_mutation();
    }

    /// Store the submitted seller intake form.
    pub fn set_seller_profile(&mut self, profile: SellerProfile) {
        self.snapshot.seller_data = Some(profile);
        self.after_mutation();
    }

    /// Set the signed agreement link.
    pub fn set_agreement_url(&mut self, url: impl Into<String>) {
        self.snapshot.agreement_url = url.into();
        self.after_mutation();
    }

    /// Persist any pending changes now instead of waiting out the
    /// debounce window.
    pub async fn flush(&mut self) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.store
            .lock()
            .await
            .save_dashboard(&self.snapshot)
            .await
            .context("flushing dashboard")?;
        Ok(())
    }

    fn after_mutation(&mut self) {
        self.rederive();
        self.snapshot.touch();
        self.schedule_save();
    }

    fn rederive(&mut self) {
        let journey = self.snapshot.journey;
        let state = &self.snapshot.progress_data.checked_items;
        self.snapshot.progress_data.completed_steps =
            completed_steps(journey, state).into_iter().collect();
        let progress = overall_progress(journey, state);
        self.snapshot.progress_data.overall_progress = progress;
        self.snapshot.progress = progress;
    }

    /// Reset the debounce timer. Only the most recent snapshot survives a
    /// burst; earlier timers are aborted before they fire.
    fn schedule_save(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let store = Arc::clone(&self.store);
        let snapshot = self.snapshot.clone();
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = store.lock().await.save_dashboard(&snapshot).await;
            if let Err(e) = result {
                tracing::warn!(dashboard = %snapshot.id, error = %e, "debounced save failed");
            }
        }));
    }
}

impl<S: DocumentStore + 'static> Drop for DashboardSession<S> {
    fn drop(&mut self) {
        // Tearing the session down abandons the pending write.
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hometrack_core::{
        checklist, CriticalDateRecord, DashboardStatus, PropertyRecord, ReceivedOfferRecord,
        User, UtilityTransferRecord,
    };
    use hometrack_storage::{Credentials, MemoryStore, StorageError};

    /// Store double that records every dashboard write and can be told
    /// to fail saves.
    #[derive(Default)]
    struct RecordingStore {
        seeded: Option<DashboardSnapshot>,
        writes: Vec<DashboardSnapshot>,
        fail_saves: bool,
    }

    #[async_trait::async_trait]
    impl DocumentStore for RecordingStore {
        async fn save_dashboard(
            &mut self,
            dashboard: &DashboardSnapshot,
        ) -> hometrack_storage::Result<()> {
            if self.fail_saves {
                return Err(StorageError::Other("simulated outage".to_string()));
            }
            self.writes.push(dashboard.clone());
            Ok(())
        }

        async fn load_dashboard(
            &self,
            id: DashboardId,
        ) -> hometrack_storage::Result<Option<DashboardSnapshot>> {
            Ok(self.seeded.clone().filter(|d| d.id == id))
        }

        async fn list_dashboards_for(
            &self,
            _user_id: UserId,
        ) -> hometrack_storage::Result<Vec<DashboardSnapshot>> {
            Ok(vec![])
        }

        async fn delete_dashboard(&mut self, _id: DashboardId) -> hometrack_storage::Result<()> {
            Ok(())
        }

        async fn add_member(
            &mut self,
            _id: DashboardId,
            _user_id: UserId,
        ) -> hometrack_storage::Result<()> {
            Ok(())
        }

        async fn set_status(
            &mut self,
            _id: DashboardId,
            _status: DashboardStatus,
        ) -> hometrack_storage::Result<()> {
            Ok(())
        }

        async fn save_user(&mut self, _user: &User) -> hometrack_storage::Result<()> {
            Ok(())
        }

        async fn load_user(&self, _id: UserId) -> hometrack_storage::Result<Option<User>> {
            Ok(None)
        }

        async fn find_user_by_email(
            &self,
            _email: &str,
        ) -> hometrack_storage::Result<Option<User>> {
            Ok(None)
        }

        async fn save_credentials(
            &mut self,
            _credentials: &Credentials,
        ) -> hometrack_storage::Result<()> {
            Ok(())
        }

        async fn load_credentials(
            &self,
            _email: &str,
        ) -> hometrack_storage::Result<Option<Credentials>> {
            Ok(None)
        }
    }

    fn seeded_store(
        journey: JourneyType,
    ) -> (Arc<Mutex<RecordingStore>>, DashboardId, UserId) {
        let owner = UserId::new();
        let dashboard =
            DashboardSnapshot::new("Session test", journey, owner, "Jo", "jo@example.com");
        let id = dashboard.id;
        let store = Arc::new(Mutex::new(RecordingStore {
            seeded: Some(dashboard),
            ..Default::default()
        }));
        (store, id, owner)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_mutations_coalesces_into_one_write() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        let mut session = DashboardSession::open(store.clone(), id, owner).await.unwrap();

        session.toggle_checklist_item(0, 0);
        session.toggle_checklist_item(0, 1);
        session.toggle_checklist_item(0, 2);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let store = store.lock().await;
        assert_eq!(store.writes.len(), 1, "burst should coalesce to one write");
        let written = &store.writes[0];
        assert!(written.progress_data.checked_items.is_checked(0, 0));
        assert!(written.progress_data.checked_items.is_checked(0, 1));
        assert!(written.progress_data.checked_items.is_checked(0, 2));
        assert_eq!(written.progress, session.progress());
    }

    #[tokio::test(start_paused = true)]
    async fn mutations_outside_the_window_each_write() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        let mut session = DashboardSession::open(store.clone(), id, owner).await.unwrap();

        session.toggle_checklist_item(0, 0);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        session.toggle_checklist_item(0, 1);
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.lock().await.writes.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_session_abandons_the_pending_write() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        let mut session = DashboardSession::open(store.clone(), id, owner).await.unwrap();

        session.toggle_checklist_item(0, 0);
        drop(session);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(store.lock().await.writes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn flush_writes_immediately_and_cancels_the_timer() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        let mut session = DashboardSession::open(store.clone(), id, owner).await.unwrap();

        session.toggle_checklist_item(0, 0);
        session.flush().await.unwrap();
        assert_eq!(store.lock().await.writes.len(), 1);

        // The aborted debounce timer must not produce a second write.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(store.lock().await.writes.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_save_does_not_block_further_mutation() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        store.lock().await.fail_saves = true;
        let mut session = DashboardSession::open(store.clone(), id, owner).await.unwrap();

        session.toggle_checklist_item(0, 0);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // In-memory state is still authoritative and editable.
        session.toggle_checklist_item(0, 1);
        assert!(session.snapshot().progress_data.checked_items.is_checked(0, 1));
        assert!(session.progress() > 0);
        assert!(store.lock().await.writes.is_empty());
    }

    #[tokio::test]
    async fn derived_fields_follow_every_toggle() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        let mut session = DashboardSession::open(store, id, owner).await.unwrap();

        let items = checklist(JourneyType::Buyer, 0).len();
        for index in 0..items {
            session.toggle_checklist_item(0, index);
        }
        assert_eq!(session.completed_steps(), &[0]);
        assert_eq!(session.progress(), 10); // buyer step 0 weighs 0.10

        session.toggle_checklist_item(0, 0);
        assert!(session.completed_steps().is_empty());
        assert!(session.progress() < 10);
    }

    #[tokio::test]
    async fn add_record_routes_by_variant_and_assigns_ids() {
        let (store, id, owner) = seeded_store(JourneyType::Seller);
        let mut session = DashboardSession::open(store, id, owner).await.unwrap();

        let offer_id = session.add_record(TrackedRecord::ReceivedOffer(ReceivedOfferRecord {
            buyer_name: "B. Buyer".into(),
            offer_price: "410000".into(),
            ..Default::default()
        }));
        let date_id = session.add_record(TrackedRecord::CriticalDate(CriticalDateRecord {
            description: "Appraisal deadline".into(),
            due_date: "2024-06-01".into(),
            ..Default::default()
        }));
        session.add_record(TrackedRecord::ClientProperty(PropertyRecord {
            address: "12 Oak St".into(),
            price: "389000".into(),
            ..Default::default()
        }));
        session.add_record(TrackedRecord::UtilityTransfer(UtilityTransferRecord {
            kind: "Water".into(),
            provider: "City".into(),
            ..Default::default()
        }));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.offers.len(), 1);
        assert_eq!(snapshot.critical_dates.len(), 1);
        assert_eq!(snapshot.client_properties.len(), 1);
        assert_eq!(snapshot.utility_transfer_items.len(), 1);
        assert_eq!(snapshot.offers[0].id, offer_id);
        assert_ne!(offer_id, date_id);
    }

    #[tokio::test]
    async fn fixed_checklist_toggle_ignores_out_of_range() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        let mut session = DashboardSession::open(store, id, owner).await.unwrap();

        session.toggle_fixed_item(FixedChecklist::FinalWalkthrough, 0);
        assert!(session.snapshot().final_walkthrough_items[0].checked);

        let before = session.snapshot().clone();
        session.toggle_fixed_item(FixedChecklist::MovingDay, 99);
        assert_eq!(session.snapshot(), &before);
    }

    #[tokio::test]
    async fn notes_and_profile_updates_land_in_the_snapshot() {
        let (store, id, owner) = seeded_store(JourneyType::Buyer);
        let mut session = DashboardSession::open(store, id, owner).await.unwrap();

        session.set_client_notes("financial", "pre-approval in hand");
        session.set_agent_notes("financial", "follow up on rate lock");
        session.set_agreement_url("https://docs.example.com/agreement.pdf");

        let mut profile = ClientProfile::default();
        profile.name = "Jo Client".into();
        profile.budget = "400000-500000".into();
        session.set_client_profile(profile);

        let snapshot = session.snapshot();
        let notes = snapshot.notes.get("financial").unwrap();
        assert_eq!(notes.client_notes, "pre-approval in hand");
        assert_eq!(notes.agent_notes, "follow up on rate lock");
        assert_eq!(
            snapshot.client_data.as_ref().map(|p| p.name.as_str()),
            Some("Jo Client")
        );
    }

    #[tokio::test]
    async fn non_members_cannot_open_a_dashboard() {
        let (store, id, _owner) = seeded_store(JourneyType::Buyer);
        let outsider = UserId::new();
        assert!(DashboardSession::open(store, id, outsider).await.is_err());
    }

    #[tokio::test]
    async fn create_persists_immediately() {
        let store = Arc::new(Mutex::new(MemoryStore::new()));
        let owner = UserId::new();
        let session = DashboardSession::create(
            store.clone(),
            owner,
            "The Kim Purchase",
            JourneyType::Buyer,
            "Kim",
            "kim@example.com",
        )
        .await
        .unwrap();

        let loaded = store
            .lock()
            .await
            .load_dashboard(session.snapshot().id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.title, "The Kim Purchase");
        assert_eq!(loaded.status, DashboardStatus::PendingInvitation);
    }
}
