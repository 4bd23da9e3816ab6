//! Tracked records - user-added entries in the per-step list tools.
//!
//! Each tool has its own shape, so records are a tagged union rather than
//! one loose bag of optional fields; handling code gets compile-time
//! exhaustiveness when a new tool is added. Field values stay strings the
//! way the entry forms produce them (prices included).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::RecordId;

/// A property the client or agent is tracking during house hunting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Unique within its owning list
    #[serde(default)]
    pub id: RecordId,

    /// Street address
    pub address: String,

    /// Listing price
    pub price: String,

    #[serde(default)]
    pub beds: String,

    #[serde(default)]
    pub baths: String,

    #[serde(default)]
    pub sqft: String,

    /// Photo URL
    #[serde(default)]
    pub image_url: String,

    /// Listing URL
    #[serde(default)]
    pub listing_url: String,

    #[serde(default)]
    pub notes: String,

    /// Optional viewing scorecard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorecard: Option<PropertyScorecard>,
}

/// Ratings and pros/cons captured after viewing a property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyScorecard {
    /// Criterion name -> rating 1..=5
    #[serde(default)]
    pub ratings: BTreeMap<String, u8>,

    #[serde(default)]
    pub pros: String,

    #[serde(default)]
    pub cons: String,

    /// Mean rating, rounded to one decimal
    #[serde(default)]
    pub average_score: f64,
}

impl PropertyScorecard {
    /// Recompute the average from the ratings, rounded to one decimal.
    /// Zero when no criteria are rated.
    pub fn recompute_average(&mut self) {
        if self.ratings.is_empty() {
            self.average_score = 0.0;
            return;
        }
        let sum: f64 = self.ratings.values().map(|&v| v as f64).sum();
        let mean = sum / self.ratings.len() as f64;
        self.average_score = (mean * 10.0).round() / 10.0;
    }
}

/// One row of the buyer offer tracker (offers made, counters, responses).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferActivityRecord {
    #[serde(default)]
    pub id: RecordId,

    /// Activity date
    pub date: String,

    /// Offer / counter-offer / seller response
    #[serde(rename = "type")]
    pub kind: String,

    pub price: String,

    #[serde(default)]
    pub key_terms: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub notes: String,
}

/// Inspection and due-diligence task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiligenceTaskRecord {
    #[serde(default)]
    pub id: RecordId,

    pub task_name: String,

    #[serde(default)]
    pub scheduled_date: String,

    #[serde(default)]
    pub vendor_contact: String,

    #[serde(default)]
    pub report_due_date: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub notes: String,
}

/// Repair or credit request built from inspection findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairRequestRecord {
    #[serde(default)]
    pub id: RecordId,

    pub issue_description: String,

    #[serde(default)]
    pub desired_action: String,

    #[serde(default)]
    pub estimated_cost: String,

    #[serde(default)]
    pub notes: String,
}

/// A contract deadline both parties need to hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalDateRecord {
    #[serde(default)]
    pub id: RecordId,

    pub description: String,

    pub due_date: String,

    #[serde(default)]
    pub responsible_party: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub notes: String,
}

/// Link to a transaction document kept in the shared hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLinkRecord {
    #[serde(default)]
    pub id: RecordId,

    pub document_name: String,

    pub url: String,

    #[serde(default)]
    pub uploaded_by: String,

    #[serde(default)]
    pub date_added: String,
}

/// Utility account transfer scheduled around closing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityTransferRecord {
    #[serde(default)]
    pub id: RecordId,

    /// Electricity, water, gas, internet, ...
    #[serde(rename = "type")]
    pub kind: String,

    pub provider: String,

    #[serde(default)]
    pub account: String,

    #[serde(default)]
    pub scheduled_date: String,

    /// Confirmation number
    #[serde(default)]
    pub confirmation: String,

    #[serde(default)]
    pub status: String,
}

/// An offer a seller received from a prospective buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedOfferRecord {
    #[serde(default)]
    pub id: RecordId,

    pub buyer_name: String,

    pub offer_price: String,

    #[serde(default)]
    pub earnest_money: String,

    #[serde(default)]
    pub closing_date: String,

    #[serde(default)]
    pub contingencies: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub received_date: String,
}

/// A record headed for one of the dashboard's lists.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedRecord {
    /// Property the client found
    ClientProperty(PropertyRecord),
    /// Property the agent suggested
    AgentProperty(PropertyRecord),
    /// Buyer offer-tracker row
    OfferActivity(OfferActivityRecord),
    /// Due-diligence task
    DiligenceTask(DiligenceTaskRecord),
    /// Repair request
    RepairRequest(RepairRequestRecord),
    /// Contract deadline
    CriticalDate(CriticalDateRecord),
    /// Document hub link
    DocumentLink(DocumentLinkRecord),
    /// Utility transfer
    UtilityTransfer(UtilityTransferRecord),
    /// Seller-side received offer
    ReceivedOffer(ReceivedOfferRecord),
}

impl TrackedRecord {
    /// Name of the list this record belongs to.
    pub fn list_kind(&self) -> RecordListKind {
        match self {
            TrackedRecord::ClientProperty(_) => RecordListKind::ClientProperties,
            TrackedRecord::AgentProperty(_) => RecordListKind::AgentProperties,
            TrackedRecord::OfferActivity(_) => RecordListKind::OfferActivity,
            TrackedRecord::DiligenceTask(_) => RecordListKind::DiligenceTasks,
            TrackedRecord::RepairRequest(_) => RecordListKind::RepairRequests,
            TrackedRecord::CriticalDate(_) => RecordListKind::CriticalDates,
            TrackedRecord::DocumentLink(_) => RecordListKind::DocumentLinks,
            TrackedRecord::UtilityTransfer(_) => RecordListKind::UtilityTransfers,
            TrackedRecord::ReceivedOffer(_) => RecordListKind::ReceivedOffers,
        }
    }

    /// Stamp the record with its list-unique id.
    pub fn assign_id(&mut self, id: RecordId) {
        match self {
            TrackedRecord::ClientProperty(r) | TrackedRecord::AgentProperty(r) => r.id = id,
            TrackedRecord::OfferActivity(r) => r.id = id,
            TrackedRecord::DiligenceTask(r) => r.id = id,
            TrackedRecord::RepairRequest(r) => r.id = id,
            TrackedRecord::CriticalDate(r) => r.id = id,
            TrackedRecord::DocumentLink(r) => r.id = id,
            TrackedRecord::UtilityTransfer(r) => r.id = id,
            TrackedRecord::ReceivedOffer(r) => r.id = id,
        }
    }

    /// The record's current id.
    pub fn id(&self) -> RecordId {
        match self {
            TrackedRecord::ClientProperty(r) | TrackedRecord::AgentProperty(r) => r.id,
            TrackedRecord::OfferActivity(r) => r.id,
            TrackedRecord::DiligenceTask(r) => r.id,
            TrackedRecord::RepairRequest(r) => r.id,
            TrackedRecord::CriticalDate(r) => r.id,
            TrackedRecord::DocumentLink(r) => r.id,
            TrackedRecord::UtilityTransfer(r) => r.id,
            TrackedRecord::ReceivedOffer(r) => r.id,
        }
    }
}

/// Names of the tracked-record lists a dashboard carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordListKind {
    ClientProperties,
    AgentProperties,
    OfferActivity,
    DiligenceTasks,
    RepairRequests,
    CriticalDates,
    DocumentLinks,
    UtilityTransfers,
    ReceivedOffers,
}

impl RecordListKind {
    /// Stable name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordListKind::ClientProperties => "clientProperties",
            RecordListKind::AgentProperties => "agentProperties",
            RecordListKind::OfferActivity => "offerTrackItems",
            RecordListKind::DiligenceTasks => "diligenceTasks",
            RecordListKind::RepairRequests => "repairRequestItems",
            RecordListKind::CriticalDates => "criticalDates",
            RecordListKind::DocumentLinks => "documentHubLinks",
            RecordListKind::UtilityTransfers => "utilityTransferItems",
            RecordListKind::ReceivedOffers => "offers",
        }
    }
}
