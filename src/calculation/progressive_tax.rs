//! Progressive bracket application.
//!
//! Each band taxes only the slice of taxable income that falls inside it.
//! Every band yields a [`BracketResult`], including bands that were not
//! reached, so callers can display the full schedule.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{BracketResult, TaxSchedule};

/// Per-band breakdown plus the total tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveTaxResult {
    /// One line per band, lowest first.
    pub lines: Vec<BracketResult>,
    /// Sum of `tax` over all lines.
    pub total_tax: Decimal,
}

/// Applies `schedule` to `taxable_income`.
///
/// # Arguments
///
/// * `taxable_income` - Income after deductions; must be non-negative
/// * `schedule` - The validated bracket table
///
/// # Returns
///
/// The breakdown, whose amounts sum to `taxable_income` and whose taxes sum
/// to `total_tax`. Fails with [`EngineError::CalculationError`] on overflow.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::apply_brackets;
/// use paye_engine::models::TaxSchedule;
/// use rust_decimal_macros::dec;
///
/// let result = apply_brackets(dec!(12000000), TaxSchedule::nta_2025()).unwrap();
/// assert_eq!(result.total_tax, dec!(1950000));
/// assert_eq!(result.lines.len(), 6);
/// assert_eq!(result.lines[3].amount, dec!(0));
/// ```
pub fn apply_brackets(
    taxable_income: Decimal,
    schedule: &TaxSchedule,
) -> EngineResult<ProgressiveTaxResult> {
    if taxable_income.is_sign_negative() && !taxable_income.is_zero() {
        return Err(EngineError::calculation(format!(
            "taxable income {taxable_income} is negative"
        )));
    }

    let mut lines = Vec::with_capacity(schedule.len());
    let mut total_tax = Decimal::ZERO;

    for (position, bracket) in schedule.brackets().iter().enumerate() {
        let amount = bracket.amount_within(taxable_income);
        let tax = amount.checked_mul(bracket.rate).ok_or_else(|| {
            EngineError::calculation(format!("tax overflow in band {}", position + 1))
        })?;
        total_tax = total_tax
            .checked_add(tax)
            .ok_or_else(|| EngineError::calculation("total tax overflow"))?;

        let label = bracket.label(position);
        debug!(band = position + 1, label = %label, amount = %amount, tax = %tax, "Band applied");

        lines.push(BracketResult { label, amount, tax });
    }

    Ok(ProgressiveTaxResult { lines, total_tax })
}
