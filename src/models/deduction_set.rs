//! Derived relief amounts, one per deduction category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Label of the NHF relief.
pub const NHF_LABEL: &str = "NHF Contribution";
/// Label of the NHIS relief.
pub const NHIS_LABEL: &str = "NHIS Contribution";
/// Label of the pension relief.
pub const PENSION_LABEL: &str = "Pension Contribution";
/// Label of the loan interest relief.
pub const LOAN_INTEREST_LABEL: &str = "Interest on Loan";
/// Label of the life insurance relief.
pub const LIFE_INSURANCE_LABEL: &str = "Life Insurance";
/// Label of the rent relief.
pub const RENT_RELIEF_LABEL: &str = "Rent Relief";

/// The six reliefs deducted from gross income.
///
/// Serializes as an object keyed by the human-readable labels, in the order
/// they are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSet {
    /// NHF contribution, passed through uncapped.
    #[serde(rename = "NHF Contribution", with = "rust_decimal::serde::float")]
    pub nhf: Decimal,
    /// NHIS contribution, passed through uncapped.
    #[serde(rename = "NHIS Contribution", with = "rust_decimal::serde::float")]
    pub nhis: Decimal,
    /// Pension contribution, passed through uncapped.
    #[serde(rename = "Pension Contribution", with = "rust_decimal::serde::float")]
    pub pension: Decimal,
    /// Loan interest, passed through uncapped.
    #[serde(rename = "Interest on Loan", with = "rust_decimal::serde::float")]
    pub loan_interest: Decimal,
    /// Life insurance premium, passed through uncapped.
    #[serde(rename = "Life Insurance", with = "rust_decimal::serde::float")]
    pub life_insurance: Decimal,
    /// Capped percentage of annual rent.
    #[serde(rename = "Rent Relief", with = "rust_decimal::serde::float")]
    pub rent_relief: Decimal,
}

impl DeductionSet {
    /// Amounts paired with their labels, in display order.
    pub fn entries(&self) -> [(&'static str, Decimal); 6] {
        [
            (NHF_LABEL, self.nhf),
            (NHIS_LABEL, self.nhis),
            (PENSION_LABEL, self.pension),
            (LOAN_INTEREST_LABEL, self.loan_interest),
            (LIFE_INSURANCE_LABEL, self.life_insurance),
            (RENT_RELIEF_LABEL, self.rent_relief),
        ]
    }

    /// Sum of all six reliefs.
    ///
    /// Fails with [`EngineError::CalculationError`] if the sum overflows.
    pub fn total(&self) -> EngineResult<Decimal> {
        self.entries()
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, (label, amount)| {
                acc.checked_add(amount).ok_or_else(|| {
                    EngineError::calculation(format!("total deductions overflow at '{label}'"))
                })
            })
    }
}
