//! Calculation logic for the PAYE engine.
//!
//! This module contains the rent relief rule, relief derivation, progressive
//! bracket application and the [`calculate_paye`] entry point that combines
//! them into a [`crate::models::CalculationResult`].

mod deductions;
mod paye;
mod progressive_tax;
mod rent_relief;

pub use deductions::derive_deductions;
pub use paye::{MONTHS_PER_YEAR, calculate_paye, effective_rate};
pub use progressive_tax::{ProgressiveTaxResult, apply_brackets};
pub use rent_relief::{RENT_RELIEF_CAP, RENT_RELIEF_RATE, RentReliefRule, calculate_rent_relief};
