//! Intake profiles - what the agent learns about the client up front.

use serde::{Deserialize, Serialize};

/// Buyer intake form data.
///
/// Everything is captured as entered; parsing (budget ranges, dollar
/// amounts) happens at the point of use, e.g. when pre-filling the
/// estimators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub current_address: String,

    /// Budget, possibly a range like "400000-500000"
    pub budget: String,
    pub liquid_funds_for_purchase: String,
    pub timeframe: String,

    pub location: String,
    pub property_type: Vec<String>,
    pub house_style: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub square_footage: String,
    pub amenities: Vec<String>,
    pub must_have_features: String,
    pub deal_breakers: String,

    pub motivation: String,
    pub current_living: String,
    pub first_time_buyer: String,
    pub additional_buyers: String,
    pub monthly_income: String,
    pub employment_status: String,
    pub credit_score: String,
    pub special_requirements: String,
}

impl ClientProfile {
    /// Lower bound of the budget as a number, if one was entered.
    /// "400000-500000" and "$450,000" both parse; garbage yields None.
    pub fn budget_lower_bound(&self) -> Option<f64> {
        let lower = self.budget.split('-').next()?;
        let digits: String = lower.chars().filter(|c| c.is_ascii_digit()).collect();
        let value: f64 = digits.parse().ok()?;
        (value > 0.0).then_some(value)
    }

    /// Liquid funds as a number, if entered.
    pub fn liquid_funds(&self) -> Option<f64> {
        let digits: String = self
            .liquid_funds_for_purchase
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let value: f64 = digits.parse().ok()?;
        (value > 0.0).then_some(value)
    }
}

/// Seller intake form data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerProfile {
    pub name: String,
    pub email: String,
    pub phone: String,

    pub property_address: String,
    pub property_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub square_footage: String,
    pub lot_size: String,
    pub year_built: String,

    pub desired_price: String,
    pub timeframe: String,
    pub motivation: String,
    pub current_mortgage: String,
    pub move_out_date: String,
}
