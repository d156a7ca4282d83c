//! Calculation result models for the PAYE engine.
//!
//! This module contains the [`CalculationResult`] type and its per-band
//! [`BracketResult`] lines. Monetary fields serialize as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeductionSet;

/// The share of taxable income that fell inside one band, and its tax.
///
/// Every band of the schedule produces a line, including bands that were not
/// reached (`amount` and `tax` are zero).
///
/// # Example
///
/// ```
/// use paye_engine::models::BracketResult;
/// use rust_decimal_macros::dec;
///
/// let line = BracketResult {
///     label: "Next ₦2,200,000 @ 15%".to_string(),
///     amount: dec!(2200000),
///     tax: dec!(330000),
/// };
/// assert_eq!(line.tax, line.amount * dec!(0.15));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResult {
    /// Human-readable band description.
    pub label: String,
    /// Taxable income taxed in this band.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Tax due for this band.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

/// The complete result of a PAYE calculation.
///
/// Contains no identifiers or timestamps: the same input always yields the
/// same result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Annual gross income as supplied.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_income: Decimal,
    /// Gross income less total deductions, floored at zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income: Decimal,
    /// Sum of the six reliefs.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    /// The six reliefs by label.
    pub deductions_breakdown: DeductionSet,
    /// Annual tax due.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    /// `total_tax / 12`.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_tax: Decimal,
    /// Total tax as a percentage of gross income; zero when gross is zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub effective_rate: Decimal,
    /// One line per band, lowest first.
    pub tax_breakdown: Vec<BracketResult>,
}

impl CalculationResult {
    /// Sum of `amount` across the breakdown.
    pub fn bracket_amount_total(&self) -> Decimal {
        self.tax_breakdown.iter().map(|line| line.amount).sum()
    }

    /// Sum of `tax` across the breakdown.
    pub fn bracket_tax_total(&self) -> Decimal {
        self.tax_breakdown.iter().map(|line| line.tax).sum()
    }

    /// The highest band that taxed a non-zero amount.
    pub fn marginal_band(&self) -> Option<&BracketResult> {
        self.tax_breakdown
            .iter()
            .rev()
            .find(|line| !line.amount.is_zero())
    }
}
