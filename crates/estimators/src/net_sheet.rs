//! Buyer net sheet - estimated cash required at closing.

use serde::{Deserialize, Serialize};

/// Cash-to-close estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetSheet {
    /// Offer price
    pub offer_price: f64,

    /// Closing costs at the given percentage of the offer price
    pub closing_costs: f64,

    /// Loan amount
    pub loan_amount: f64,

    /// `offer_price + closing_costs - loan_amount`; negative when the
    /// loan covers more than price plus costs (buyer cash back)
    pub cash_to_close: f64,
}

/// Estimate cash to close.
///
/// Returns `None` ("not computable") unless `offer_price > 0`,
/// `loan_amount >= 0`, and `closing_costs_pct >= 0` - a blank form
/// renders nothing rather than a zero. A negative result is a valid
/// value and is not clamped.
pub fn net_sheet(offer_price: f64, loan_amount: f64, closing_costs_pct: f64) -> Option<NetSheet> {
    if !(offer_price > 0.0 && loan_amount >= 0.0 && closing_costs_pct >= 0.0) {
        return None;
    }
    let closing_costs = offer_price * (closing_costs_pct / 100.0);
    Some(NetSheet {
        offer_price,
        closing_costs,
        loan_amount,
        cash_to_close: offer_price + closing_costs - loan_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_purchase() {
        let sheet = net_sheet(450_000.0, 360_000.0, 3.0).unwrap();
        assert_eq!(sheet.closing_costs, 13_500.0);
        assert_eq!(sheet.cash_to_close, 103_500.0);
    }

    #[test]
    fn oversized_loan_yields_negative_cash_to_close() {
        let sheet = net_sheet(450_000.0, 500_000.0, 3.0).unwrap();
        assert_eq!(sheet.cash_to_close, -36_500.0);
    }

    #[test]
    fn zero_offer_price_is_not_computable() {
        assert!(net_sheet(0.0, 360_000.0, 3.0).is_none());
    }

    #[test]
    fn negative_inputs_are_not_computable() {
        assert!(net_sheet(450_000.0, -1.0, 3.0).is_none());
        assert!(net_sheet(450_000.0, 360_000.0, -0.5).is_none());
    }

    #[test]
    fn all_cash_purchase_computes() {
        let sheet = net_sheet(450_000.0, 0.0, 0.0).unwrap();
        assert_eq!(sheet.closing_costs, 0.0);
        assert_eq!(sheet.cash_to_close, 450_000.0);
    }
}
