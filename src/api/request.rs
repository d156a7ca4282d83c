//! Request types for the PAYE API.
//!
//! Every body is a keyed JSON object; arrays and scalars are rejected before
//! any field is read. Amounts may arrive as JSON numbers or numeric strings;
//! `null` and absent fields are equivalent. Conversion into domain types
//! happens through `TryFrom` so the CLI and the HTTP handlers share one path.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::classification::{
    ComplexityIndicator, IncomeSource, NgoIncome, NgoType, ProfileOption, ReadinessAnswers,
    TaxProfile, TaxpayerCategory, WorkType,
};
use crate::error::{EngineError, EngineResult};
use crate::models::CalculationInput;

/// Decodes a parsed JSON body into a request type.
///
/// Only objects are accepted. serde's derived struct decoding would otherwise
/// read an array positionally, so `[1, 2, 3]` would pass as three amounts.
pub fn from_body<T: DeserializeOwned>(body: Value) -> EngineResult<T> {
    if !body.is_object() {
        return Err(EngineError::invalid_input("body", "must be a JSON object"));
    }
    serde_json::from_value(body).map_err(|e| EngineError::invalid_input("body", e.to_string()))
}

/// Request body for `POST /api/calculate-paye`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationRequest {
    /// Annual gross income (required).
    #[serde(deserialize_with = "deserialize_amount")]
    pub gross_income: Option<Decimal>,
    /// Pension contribution.
    #[serde(deserialize_with = "deserialize_amount")]
    pub pension: Option<Decimal>,
    /// National Housing Fund contribution.
    #[serde(deserialize_with = "deserialize_amount")]
    pub nhf: Option<Decimal>,
    /// National Health Insurance Scheme contribution.
    #[serde(deserialize_with = "deserialize_amount")]
    pub nhis: Option<Decimal>,
    /// Interest on a loan for an owner-occupied house.
    #[serde(deserialize_with = "deserialize_amount")]
    pub loan_interest: Option<Decimal>,
    /// Life insurance premium.
    #[serde(deserialize_with = "deserialize_amount")]
    pub life_insurance: Option<Decimal>,
    /// Annual rent paid.
    #[serde(deserialize_with = "deserialize_amount")]
    pub annual_rent: Option<Decimal>,
}

impl CalculationRequest {
    /// Parses a request body from JSON text.
    ///
    /// Syntax errors, non-object bodies and non-numeric amounts all surface
    /// as [`EngineError::InvalidInput`].
    pub fn from_json_str(content: &str) -> EngineResult<Self> {
        let body: Value = serde_json::from_str(content)
            .map_err(|e| EngineError::invalid_input("body", e.to_string()))?;
        from_body(body)
    }
}

/// Reads an optional amount from a JSON number or numeric string.
///
/// Values beyond [`Decimal::MAX`] get their own message rather than serde's
/// generic type error.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => parse_amount(&number.to_string()).map(Some),
        Some(Value::String(text)) => parse_amount(&text).map(Some),
        Some(other) => Err(D::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}

fn parse_amount<E: serde::de::Error>(text: &str) -> Result<Decimal, E> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => E::custom(format!(
                "amount {text} exceeds the supported range of {} to {}",
                Decimal::MIN,
                Decimal::MAX
            )),
            _ => E::custom(format!(
                "expected a number or numeric string, got \"{text}\""
            )),
        })
}

impl TryFrom<CalculationRequest> for CalculationInput {
    type Error = EngineError;

    fn try_from(request: CalculationRequest) -> Result<Self, Self::Error> {
        let gross_income = request
            .gross_income
            .ok_or_else(|| EngineError::invalid_input("grossIncome", "is required"))?;

        let input = CalculationInput {
            gross_income,
            pension: request.pension.unwrap_or(Decimal::ZERO),
            nhf: request.nhf.unwrap_or(Decimal::ZERO),
            nhis: request.nhis.unwrap_or(Decimal::ZERO),
            loan_interest: request.loan_interest.unwrap_or(Decimal::ZERO),
            life_insurance: request.life_insurance.unwrap_or(Decimal::ZERO),
            annual_rent: request.annual_rent.unwrap_or(Decimal::ZERO),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Request body for `POST /api/classify`. Options are given by wire id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifyRequest {
    /// How the taxpayer earns income (required).
    pub work_type: Option<String>,
    /// Complexity indicators for freelance, business or mixed work.
    pub complexity: Vec<String>,
    /// Organisation types, for non-profits.
    pub ngo_types: Vec<String>,
    /// Income streams, for non-profits.
    pub ngo_income: Vec<String>,
    /// Where the income comes from; blank is treated as absent.
    pub income_source: Option<String>,
}

impl TryFrom<ClassifyRequest> for TaxProfile {
    type Error = EngineError;

    fn try_from(request: ClassifyRequest) -> Result<Self, Self::Error> {
        let work_type = match request.work_type.as_deref() {
            Some(value) => WorkType::parse("workType", value)?,
            None => {
                return Err(EngineError::InvalidProfile {
                    field: "workType".to_string(),
                    message: "is required".to_string(),
                });
            }
        };

        let income_source = request
            .income_source
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| IncomeSource::parse("incomeSource", value))
            .transpose()?;

        Ok(TaxProfile {
            work_type,
            complexity: ComplexityIndicator::parse_all("complexity", &request.complexity)?,
            ngo_types: NgoType::parse_all("ngoTypes", &request.ngo_types)?,
            ngo_income: NgoIncome::parse_all("ngoIncome", &request.ngo_income)?,
            income_source,
        })
    }
}

/// Request body for `POST /api/assessment`.
pub type AssessmentRequest = ReadinessAnswers;

/// Query string for `GET /api/checklist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChecklistQuery {
    /// Category id, e.g. `business-owner` (required).
    pub category: Option<String>,
    /// Comma-separated ids of items already done.
    pub completed: Option<String>,
}

impl ChecklistQuery {
    /// Resolves the category id.
    pub fn category(&self) -> EngineResult<TaxpayerCategory> {
        match self.category.as_deref() {
            Some(value) => TaxpayerCategory::parse("category", value),
            None => Err(EngineError::InvalidProfile {
                field: "category".to_string(),
                message: "is required".to_string(),
            }),
        }
    }

    /// The completed item ids, blanks dropped.
    pub fn completed_ids(&self) -> Vec<&str> {
        self.completed
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
