//! PAYE engine for the Nigeria Tax Act 2025
//!
//! This crate computes annual personal income tax from gross income and
//! statutory deductions using the progressive NTA 2025 bracket table, and
//! serves it over a small JSON API. It also carries the questionnaire tools
//! around it: a taxpayer status classifier, per-category compliance
//! checklists and a readiness check.
//!
//! # Example
//!
//! ```
//! use paye_engine::calculation::calculate_paye;
//! use paye_engine::models::{CalculationInput, TaxRules};
//! use rust_decimal_macros::dec;
//!
//! let input = CalculationInput::new(dec!(60000000));
//! let result = calculate_paye(&input, TaxRules::nta_2025()).unwrap();
//! assert_eq!(result.total_tax, dec!(12930000));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod classification;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
