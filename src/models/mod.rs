//! Core data models for the PAYE engine.
//!
//! This module contains the domain models used throughout the engine: the
//! calculation input, derived deductions, the bracket schedule and the
//! calculation result.

mod calculation_input;
mod calculation_result;
mod deduction_set;
mod tax_rules;
mod tax_schedule;

pub use calculation_input::CalculationInput;
pub use calculation_result::{BracketResult, CalculationResult};
pub use deduction_set::{
    DeductionSet, LIFE_INSURANCE_LABEL, LOAN_INTEREST_LABEL, NHF_LABEL, NHIS_LABEL, PENSION_LABEL,
    RENT_RELIEF_LABEL,
};
pub use tax_rules::{RulesMetadata, TaxRules};
pub use tax_schedule::{NTA_2025_BANDS, TaxBracket, TaxSchedule};
