//! Journey definitions - the fixed six-step buyer and seller workflows.
//!
//! Steps, weights, checklist labels, and note-section names are static
//! content. They are not user-editable; dashboards only record which
//! checklist items are checked.

use serde::{Deserialize, Serialize};

/// Which of the two journeys a dashboard tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyType {
    /// Home purchase workflow
    Buyer,
    /// Home sale workflow
    Seller,
}

impl JourneyType {
    /// Stable lowercase name, matching the persisted document value.
    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyType::Buyer => "buyer",
            JourneyType::Seller => "seller",
        }
    }
}

impl std::fmt::Display for JourneyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JourneyType {
    type Err = UnknownJourney;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(JourneyType::Buyer),
            "seller" => Ok(JourneyType::Seller),
            other => Err(UnknownJourney(other.to_string())),
        }
    }
}

/// Error for parsing a journey type from external input.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown journey type: {0}")]
pub struct UnknownJourney(pub String);

/// Static definition of one journey step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDef {
    /// 0-based position in the journey
    pub id: usize,

    /// Display title
    pub title: &'static str,

    /// One-line description
    pub description: &'static str,

    /// Contribution of this step to overall progress. Weights sum to 1.0
    /// per journey.
    pub weight: f64,
}

const BUYER_STEPS: [StepDef; 6] = [
    StepDef {
        id: 0,
        title: "1. Client Intake & Consultation",
        description: "Let's get to know you and your homebuying goals",
        weight: 0.10,
    },
    StepDef {
        id: 1,
        title: "2. Financial Pre-Approval",
        description: "Secure your financing and determine your budget",
        weight: 0.15,
    },
    StepDef {
        id: 2,
        title: "3. House Hunting",
        description: "Find, analyze, and view potential homes",
        weight: 0.25,
    },
    StepDef {
        id: 3,
        title: "4. Offer & Negotiation",
        description: "Make competitive offers and negotiate terms",
        weight: 0.20,
    },
    StepDef {
        id: 4,
        title: "5. Under Contract & Inspections",
        description: "Conduct due diligence and inspections",
        weight: 0.15,
    },
    StepDef {
        id: 5,
        title: "6. Closing Process",
        description: "Finalize the purchase and get your keys",
        weight: 0.15,
    },
];

const SELLER_STEPS: [StepDef; 6] = [
    StepDef {
        id: 0,
        title: "1. Seller Consultation",
        description: "Understanding your selling goals and property",
        weight: 0.15,
    },
    StepDef {
        id: 1,
        title: "2. Market Analysis & Pricing",
        description: "Determine optimal pricing strategy",
        weight: 0.20,
    },
    StepDef {
        id: 2,
        title: "3. Property Preparation",
        description: "Prepare your home for the market",
        weight: 0.25,
    },
    StepDef {
        id: 3,
        title: "4. Marketing & Showings",
        description: "Market your property and manage showings",
        weight: 0.15,
    },
    StepDef {
        id: 4,
        title: "5. Offers & Negotiation",
        description: "Review and negotiate offers",
        weight: 0.15,
    },
    StepDef {
        id: 5,
        title: "6. Closing Process",
        description: "Complete the sale and transfer ownership",
        weight: 0.10,
    },
];

const BUYER_CHECKLISTS: [&[&str]; 6] = [
    &[
        "Complete comprehensive buyer intake form",
        "Review and confirm all submitted information",
        "Add any additional notes or special requirements",
        "Sign buyer representation agreement",
        "Schedule initial consultation meeting",
    ],
    &[
        "Gather Financial Documents",
        "Choose a Lender",
        "Submit Loan Application",
        "Receive Pre-Approval Letter",
        "Understand Loan Terms",
    ],
    &[
        "Define search area and must-haves vs nice-to-haves",
        "Set up MLS property alerts",
        "Review online listings",
        "Schedule viewings",
        "Research neighborhood amenities",
        "Review property history and disclosures",
    ],
    &[
        "Prepare competitive market analysis",
        "Draft and submit purchase offer",
        "Negotiate price and terms",
        "Review and sign purchase agreement",
        "Submit earnest money deposit",
    ],
    &[
        "Order home inspection",
        "Review inspection report",
        "Request repairs or credits if needed",
        "Finalize mortgage application",
        "Conduct final walkthrough",
    ],
    &[
        "Review closing disclosure",
        "Secure homeowner's insurance",
        "Conduct final walkthrough",
        "Sign closing documents",
        "Receive keys and celebrate!",
    ],
];

const SELLER_CHECKLISTS: [&[&str]; 6] = [
    &[
        "Complete comprehensive seller intake form",
        "Property assessment and walkthrough",
        "Discuss selling timeline and goals",
        "Review market conditions",
        "Sign listing agreement",
    ],
    &[
        "Analyze comparable sales (CMA)",
        "Review current market conditions",
        "Determine pricing strategy",
        "Set initial listing price",
        "Plan for potential price adjustments",
    ],
    &[
        "Complete home inspection (optional)",
        "Address necessary repairs",
        "Stage the property",
        "Professional photography",
        "Prepare property disclosures",
    ],
    &[
        "Create marketing materials",
        "List on MLS and websites",
        "Schedule professional photos",
        "Plan open houses",
        "Coordinate showing appointments",
    ],
    &[
        "Review incoming offers",
        "Analyze offer terms and conditions",
        "Negotiate with potential buyers",
        "Accept best offer",
        "Sign purchase agreement",
    ],
    &[
        "Coordinate buyer inspections",
        "Handle any repair negotiations",
        "Prepare for final walkthrough",
        "Review closing documents",
        "Complete the sale and transfer keys",
    ],
];

const BUYER_NOTE_SECTIONS: [&str; 6] = [
    "consultation",
    "financial",
    "houseHunting",
    "offer",
    "inspection",
    "closing",
];

const SELLER_NOTE_SECTIONS: [&str; 6] = [
    "consultation",
    "pricing",
    "preparation",
    "marketing",
    "offers",
    "closing",
];

/// Ordered steps of a journey.
pub fn steps(journey: JourneyType) -> &'static [StepDef] {
    match journey {
        JourneyType::Buyer => &BUYER_STEPS,
        JourneyType::Seller => &SELLER_STEPS,
    }
}

/// Checklist item labels for one step. Out-of-range step ids yield an
/// empty checklist.
pub fn checklist(journey: JourneyType, step_id: usize) -> &'static [&'static str] {
    let lists: &[&[&str]] = match journey {
        JourneyType::Buyer => &BUYER_CHECKLISTS,
        JourneyType::Seller => &SELLER_CHECKLISTS,
    };
    lists.get(step_id).copied().unwrap_or(&[])
}

/// Note-section keys for a journey, one per step, in step order.
pub fn note_sections(journey: JourneyType) -> &'static [&'static str] {
    match journey {
        JourneyType::Buyer => &BUYER_NOTE_SECTIONS,
        JourneyType::Seller => &SELLER_NOTE_SECTIONS,
    }
}
