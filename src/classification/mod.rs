//! Taxpayer status classification, compliance checklists and readiness.
//!
//! All three are deterministic rule tables over questionnaire answers; none
//! touches the PAYE arithmetic.

mod checklist;
mod classifier;
mod profile;
mod readiness;

pub use checklist::{Checklist, ChecklistItem, build_checklist, checklist_items};
pub use classifier::{ClassificationResult, TaxpayerCategory, categorize, classify};
pub use profile::{
    ComplexityIndicator, IncomeSource, NgoIncome, NgoType, ProfileOption, TaxProfile, WorkType,
};
pub use readiness::{
    HIGH_READINESS_SCORE, MEDIUM_READINESS_SCORE, POINTS_PER_ANSWER, ReadinessAnswers,
    ReadinessLevel, ReadinessReport, assess_readiness,
};
