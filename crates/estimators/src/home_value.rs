//! Naive home-value estimate.
//!
//! A deliberately crude placeholder model ($150/sqft plus flat bonuses),
//! not a market analysis. The formula itself is the contract: dashboards
//! have always shown these exact numbers, so changing the model would
//! silently change every stored conversation about price.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Property facts feeding the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeValueInput {
    /// Living area in square feet; the estimate is not computable
    /// without it
    pub square_footage: f64,

    /// Bedroom count
    pub bedrooms: u32,

    /// Bathroom count; halves allowed
    pub bathrooms: f64,

    /// Construction year; defaults to the current year when absent
    pub year_built: Option<i32>,
}

/// The estimate and its components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeValueEstimate {
    /// `square_footage * 150`
    pub base: f64,

    /// `bedrooms * 5000`
    pub bedroom_bonus: f64,

    /// `bathrooms * 3000`
    pub bathroom_bonus: f64,

    /// `max(0, (year_built - 1950) * 100)`
    pub age_adjustment: f64,

    /// Sum of the components
    pub estimate: f64,

    /// Estimate minus 10%
    pub low: f64,

    /// Estimate plus 10%
    pub high: f64,
}

/// Estimate a market value. Returns `None` when square footage is not
/// positive.
pub fn home_value(input: &HomeValueInput) -> Option<HomeValueEstimate> {
    if input.square_footage <= 0.0 {
        return None;
    }
    let year = input
        .year_built
        .unwrap_or_else(|| chrono::Utc::now().year());

    let base = input.square_footage * 150.0;
    let bedroom_bonus = input.bedrooms as f64 * 5_000.0;
    let bathroom_bonus = input.bathrooms * 3_000.0;
    let age_adjustment = (f64::from(year - 1950) * 100.0).max(0.0);

    let estimate = base + bedroom_bonus + bathroom_bonus + age_adjustment;
    let variance = estimate * 0.10;

    Some(HomeValueEstimate {
        base,
        bedroom_bonus,
        bathroom_bonus,
        age_adjustment,
        estimate,
        low: estimate - variance,
        high: estimate + variance,
    })
}
