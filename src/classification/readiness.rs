//! Compliance readiness self-check.

use serde::{Deserialize, Serialize};

/// Points awarded for each affirmative answer.
pub const POINTS_PER_ANSWER: u8 = 20;

/// Minimum score for [`ReadinessLevel::High`].
pub const HIGH_READINESS_SCORE: u8 = 80;

/// Minimum score for [`ReadinessLevel::Medium`].
pub const MEDIUM_READINESS_SCORE: u8 = 40;

/// Yes/no answers to the readiness questions. Missing answers count as "no".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadinessAnswers {
    /// Has a Tax Identification Number.
    #[serde(alias = "hasTIN")]
    pub has_tin: bool,
    /// Keeps records of income and expenses.
    pub keeps_records: bool,
    /// Filed a return for the previous year.
    pub filed_last_year: bool,
    /// Knows which deductions apply.
    pub understands_deductions: bool,
    /// Uses a separate account for business money.
    pub separates_business_personal: bool,
}

impl ReadinessAnswers {
    /// Each answer paired with the advice given when it is "no".
    fn with_advice(&self) -> [(bool, &'static str); 5] {
        [
            (
                self.has_tin,
                "Register for a TIN immediately. It's the first step.",
            ),
            (
                self.keeps_records,
                "Start keeping organized records of all income and expenses.",
            ),
            (
                self.filed_last_year,
                "File your returns for the previous year to avoid penalties.",
            ),
            (
                self.understands_deductions,
                "Learn about tax deductions to legally reduce your tax bill.",
            ),
            (
                self.separates_business_personal,
                "Open a separate bank account for business transactions.",
            ),
        ]
    }
}

/// Readiness band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ReadinessLevel {
    /// Below [`MEDIUM_READINESS_SCORE`].
    #[serde(rename = "Low Readiness")]
    Low,
    /// From [`MEDIUM_READINESS_SCORE`] up to [`HIGH_READINESS_SCORE`].
    #[serde(rename = "Medium Readiness")]
    Medium,
    /// [`HIGH_READINESS_SCORE`] or more.
    #[serde(rename = "High Readiness")]
    High,
}

impl ReadinessLevel {
    /// Maps a score onto its band.
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_READINESS_SCORE {
            Self::High
        } else if score >= MEDIUM_READINESS_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Display name, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Readiness",
            Self::Medium => "Medium Readiness",
            Self::High => "High Readiness",
        }
    }
}

impl std::fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    /// 0 to 100.
    pub score: u8,
    /// Band for the score.
    pub level: ReadinessLevel,
    /// One line per "no" answer, in question order.
    pub advice: Vec<String>,
}

/// Scores the answers and collects advice for every gap.
pub fn assess_readiness(answers: &ReadinessAnswers) -> ReadinessReport {
    let mut score = 0u8;
    let mut advice = Vec::new();

    for (answered_yes, tip) in answers.with_advice() {
        if answered_yes {
            score += POINTS_PER_ANSWER;
        } else {
            advice.push(tip.to_string());
        }
    }

    ReadinessReport {
        score,
        level: ReadinessLevel::from_score(score),
        advice,
    }
}
