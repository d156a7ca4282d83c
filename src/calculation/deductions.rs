//! Relief derivation.
//!
//! NHF, NHIS, pension, loan interest and life insurance pass through
//! uncapped; rent relief is derived from annual rent by [`RentReliefRule`].
//! Statutory caps on pension and NHF are not applied.

use crate::models::{CalculationInput, DeductionSet};

use super::RentReliefRule;

/// Derives the six reliefs for `input`.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::{derive_deductions, RentReliefRule};
/// use paye_engine::models::CalculationInput;
/// use rust_decimal_macros::dec;
///
/// let input = CalculationInput::new(dec!(5000000))
///     .with_pension(dec!(400000))
///     .with_annual_rent(dec!(1000000));
/// let deductions = derive_deductions(&input, &RentReliefRule::default());
/// assert_eq!(deductions.pension, dec!(400000));
/// assert_eq!(deductions.rent_relief, dec!(200000));
/// ```
pub fn derive_deductions(input: &CalculationInput, rent_rule: &RentReliefRule) -> DeductionSet {
    DeductionSet {
        nhf: input.nhf,
        nhis: input.nhis,
        pension: input.pension,
        loan_interest: input.loan_interest,
        life_insurance: input.life_insurance,
        rent_relief: rent_rule.relief_for(input.annual_rent),
    }
}
