//! PAYE calculation.
//!
//! Ties the relief derivation and bracket application together into the
//! single pure entry point [`calculate_paye`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationInput, CalculationResult, TaxRules};

use super::{apply_brackets, derive_deductions};

/// Months in a tax year.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Computes the PAYE liability of `input` under `rules`.
///
/// The computation is pure: identical inputs give identical results, and no
/// rounding is applied.
///
/// # Steps
///
/// 1. Reject any negative amount.
/// 2. Derive the six reliefs (rent relief capped, the rest pass-through).
/// 3. Taxable income is gross less total deductions, floored at zero.
/// 4. Apply the progressive schedule, listing every band.
/// 5. Monthly tax is annual tax / 12; effective rate is annual tax as a
///    percentage of gross, or zero when gross is zero.
///
/// # Errors
///
/// [`EngineError::InvalidInput`] for a negative field, and
/// [`EngineError::CalculationError`] if an intermediate value overflows.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_paye;
/// use paye_engine::models::{CalculationInput, TaxRules};
/// use rust_decimal_macros::dec;
///
/// let result = calculate_paye(&CalculationInput::new(dec!(12000000)), TaxRules::nta_2025()).unwrap();
/// assert_eq!(result.taxable_income, dec!(12000000));
/// assert_eq!(result.total_tax, dec!(1950000));
/// assert_eq!(result.monthly_tax, dec!(162500));
/// assert_eq!(result.effective_rate, dec!(16.25));
/// ```
pub fn calculate_paye(
    input: &CalculationInput,
    rules: &TaxRules,
) -> EngineResult<CalculationResult> {
    input.validate()?;

    let deductions = derive_deductions(input, &rules.rent_relief);
    let total_deductions = deductions.total()?;

    let taxable_income = input
        .gross_income
        .checked_sub(total_deductions)
        .ok_or_else(|| EngineError::calculation("taxable income overflow"))?
        .max(Decimal::ZERO);

    debug!(
        gross_income = %input.gross_income,
        total_deductions = %total_deductions,
        taxable_income = %taxable_income,
        "Taxable income derived"
    );

    let progressive = apply_brackets(taxable_income, &rules.schedule)?;
    let total_tax = progressive.total_tax;

    let monthly_tax = total_tax
        .checked_div(MONTHS_PER_YEAR)
        .ok_or_else(|| EngineError::calculation("monthly tax overflow"))?;

    let effective_rate = effective_rate(total_tax, input.gross_income)?;

    Ok(CalculationResult {
        gross_income: input.gross_income,
        taxable_income,
        total_deductions,
        deductions_breakdown: deductions,
        total_tax,
        monthly_tax,
        effective_rate,
        tax_breakdown: progressive.lines,
    })
}

/// Returns `total_tax / gross_income × 100`, or zero when gross is zero.
pub fn effective_rate(total_tax: Decimal, gross_income: Decimal) -> EngineResult<Decimal> {
    if gross_income <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    total_tax
        .checked_div(gross_income)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| EngineError::calculation("effective rate overflow"))
}
