//! Monthly mortgage payment estimate (principal, interest, tax, insurance).

use serde::{Deserialize, Serialize};

/// Inputs for a PITI estimate. Values arrive already parsed; the entry
/// forms treat blank or non-numeric input as 0. Negative values are not
/// guarded and flow through the arithmetic unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitiInput {
    /// Purchase price
    pub home_price: f64,

    /// Cash down
    pub down_payment: f64,

    /// Annual interest rate in percent, e.g. 6.5
    pub annual_rate_pct: f64,

    /// Loan term in years; the forms offer 10/15/20/30 but any positive
    /// term computes
    pub term_years: u32,

    /// Annual property tax
    pub annual_tax: f64,

    /// Annual homeowners insurance
    pub annual_insurance: f64,
}

/// The monthly payment, broken into its components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitiBreakdown {
    /// Financed amount: `max(0, home_price - down_payment)`
    pub loan_amount: f64,

    /// Monthly principal and interest
    pub principal_and_interest: f64,

    /// Monthly property tax
    pub monthly_tax: f64,

    /// Monthly insurance
    pub monthly_insurance: f64,

    /// Sum of the three monthly components
    pub total: f64,
}

/// Estimate the monthly payment using the standard amortization formula.
///
/// With a zero loan amount, zero rate, or zero term, principal and
/// interest is 0 rather than dividing by zero; tax and insurance still
/// contribute. Total over its domain, never panics.
pub fn piti(input: &PitiInput) -> PitiBreakdown {
    let loan_amount = (input.home_price - input.down_payment).max(0.0);
    let monthly_rate = input.annual_rate_pct / 100.0 / 12.0;
    let num_payments = input.term_years * 12;

    let principal_and_interest = if loan_amount > 0.0 && monthly_rate > 0.0 && num_payments > 0 {
        let growth = (1.0 + monthly_rate).powi(num_payments as i32);
        loan_amount * (monthly_rate * growth) / (growth - 1.0)
    } else {
        0.0
    };

    let monthly_tax = input.annual_tax / 12.0;
    let monthly_insurance = input.annual_insurance / 12.0;

    PitiBreakdown {
        loan_amount,
        principal_and_interest,
        monthly_tax,
        monthly_insurance,
        total: principal_and_interest + monthly_tax + monthly_insurance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        let breakdown = piti(&PitiInput {
            home_price: 500_000.0,
            down_payment: 100_000.0,
            annual_rate_pct: 6.5,
            term_years: 30,
            annual_tax: 6_000.0,
            annual_insurance: 1_200.0,
        });
        assert_eq!(breakdown.loan_amount, 400_000.0);
        assert!((breakdown.principal_and_interest - 2528.27).abs() < 0.01);
        assert_eq!(breakdown.monthly_tax, 500.0);
        assert_eq!(breakdown.monthly_insurance, 100.0);
        assert!((breakdown.total - 3128.27).abs() < 0.01);
    }

    #[test]
    fn fully_paid_down_house_costs_nothing() {
        let breakdown = piti(&PitiInput {
            home_price: 300_000.0,
            down_payment: 300_000.0,
            annual_rate_pct: 0.0,
            term_years: 30,
            annual_tax: 0.0,
            annual_insurance: 0.0,
        });
        assert_eq!(breakdown.loan_amount, 0.0);
        assert_eq!(breakdown.principal_and_interest, 0.0);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn zero_rate_skips_amortization_but_keeps_escrow() {
        let breakdown = piti(&PitiInput {
            home_price: 400_000.0,
            down_payment: 100_000.0,
            annual_rate_pct: 0.0,
            term_years: 30,
            annual_tax: 2_400.0,
            annual_insurance: 1_200.0,
        });
        assert_eq!(breakdown.principal_and_interest, 0.0);
        assert_eq!(breakdown.total, 300.0);
    }

    #[test]
    fn down_payment_above_price_clamps_loan_to_zero() {
        let breakdown = piti(&PitiInput {
            home_price: 200_000.0,
            down_payment: 250_000.0,
            annual_rate_pct: 7.0,
            term_years: 15,
            annual_tax: 0.0,
            annual_insurance: 0.0,
        });
        assert_eq!(breakdown.loan_amount, 0.0);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn shorter_terms_cost_more_per_month() {
        let base = PitiInput {
            home_price: 500_000.0,
            down_payment: 100_000.0,
            annual_rate_pct: 6.5,
            term_years: 30,
            annual_tax: 0.0,
            annual_insurance: 0.0,
        };
        let thirty = piti(&base).principal_and_interest;
        let fifteen = piti(&PitiInput { term_years: 15, ..base }).principal_and_interest;
        assert!(fifteen > thirty);
    }
}
