//! The full set of rules a calculation runs against.

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::RentReliefRule;

use super::TaxSchedule;

static NTA_2025_RULES: LazyLock<TaxRules> = LazyLock::new(|| TaxRules {
    metadata: RulesMetadata {
        code: "NTA-2025".to_string(),
        name: "Nigeria Tax Act 2025 - Personal Income Tax".to_string(),
        effective_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        source_url: Some("https://fiscalreforms.ng".to_string()),
    },
    schedule: TaxSchedule::nta_2025().clone(),
    rent_relief: RentReliefRule::default(),
});

/// Identifying information about a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesMetadata {
    /// Short code, e.g. "NTA-2025".
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Date the rules take effect.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    /// Where the rules were published.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Bracket schedule plus relief parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRules {
    /// Identifying information.
    pub metadata: RulesMetadata,
    /// Progressive bracket table.
    pub schedule: TaxSchedule,
    /// Rent relief percentage and cap.
    pub rent_relief: RentReliefRule,
}

impl TaxRules {
    /// The compiled-in Nigeria Tax Act 2025 rules.
    pub fn nta_2025() -> &'static TaxRules {
        &NTA_2025_RULES
    }
}
