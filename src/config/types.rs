//! Configuration types for tax rules.
//!
//! This module contains the strongly-typed structures deserialized from a
//! `rules.yaml` file, and their conversion into validated [`TaxRules`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::RentReliefRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{RulesMetadata, TaxRules, TaxSchedule};

/// Metadata section of a rules file.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    /// Short code (e.g., "NTA-2025").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The date the rules take effect.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    /// URL to the published rules.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// One band of the bracket table. Lower bounds are derived from the widths
/// of the bands before it; omit `width` on the top band.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketConfig {
    /// The width of the band, absent for the unbounded top band.
    #[serde(default)]
    pub width: Option<Decimal>,
    /// The marginal rate as a fraction.
    pub rate: Decimal,
}

/// Rent relief parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RentReliefConfig {
    /// Fraction of annual rent that is deductible.
    pub rate: Decimal,
    /// The maximum relief.
    pub cap: Decimal,
}

/// Top-level structure of `rules.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesFile {
    /// Rule set metadata.
    pub metadata: MetadataConfig,
    /// Bracket table, lowest band first.
    pub brackets: Vec<BracketConfig>,
    /// Rent relief parameters; the statutory defaults apply when absent.
    #[serde(default)]
    pub rent_relief: Option<RentReliefConfig>,
}

impl RulesFile {
    /// Validates the file contents and builds [`TaxRules`].
    pub fn into_rules(self) -> EngineResult<TaxRules> {
        let bands: Vec<(Option<Decimal>, Decimal)> = self
            .brackets
            .iter()
            .map(|bracket| (bracket.width, bracket.rate))
            .collect();
        let schedule = TaxSchedule::from_widths(&bands)?;

        let rent_relief = match self.rent_relief {
            Some(config) => {
                if config.rate < Decimal::ZERO || config.rate > Decimal::ONE {
                    return Err(EngineError::InvalidSchedule {
                        message: format!("rent relief rate {} is outside [0, 1]", config.rate),
                    });
                }
                if config.cap < Decimal::ZERO {
                    return Err(EngineError::InvalidSchedule {
                        message: format!("rent relief cap {} is negative", config.cap),
                    });
                }
                RentReliefRule {
                    rate: config.rate,
                    cap: config.cap,
                }
            }
            None => RentReliefRule::default(),
        };

        Ok(TaxRules {
            metadata: RulesMetadata {
                code: self.metadata.code,
                name: self.metadata.name,
                effective_date: self.metadata.effective_date,
                source_url: self.metadata.source_url,
            },
            schedule,
            rent_relief,
        })
    }
}
