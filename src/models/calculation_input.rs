//! The validated input record for a PAYE calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Annual gross income and the six deduction inputs, in Naira.
///
/// Optional deductions default to zero. Construct with [`CalculationInput::new`]
/// and the `with_*` setters, or with a struct literal.
///
/// # Example
///
/// ```
/// use paye_engine::models::CalculationInput;
/// use rust_decimal_macros::dec;
///
/// let input = CalculationInput::new(dec!(12000000))
///     .with_pension(dec!(960000))
///     .with_annual_rent(dec!(1800000));
/// assert!(input.validate().is_ok());
/// assert_eq!(input.nhf, dec!(0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculationInput {
    /// Annual gross income.
    pub gross_income: Decimal,
    /// Pension contribution.
    pub pension: Decimal,
    /// National Housing Fund contribution.
    pub nhf: Decimal,
    /// National Health Insurance Scheme contribution.
    pub nhis: Decimal,
    /// Interest paid on a loan for an owner-occupied house.
    pub loan_interest: Decimal,
    /// Life insurance premium.
    pub life_insurance: Decimal,
    /// Annual rent paid; only a capped share of it is deductible.
    pub annual_rent: Decimal,
}

impl CalculationInput {
    /// Creates an input with the given gross income and no deductions.
    pub fn new(gross_income: Decimal) -> Self {
        Self {
            gross_income,
            ..Self::default()
        }
    }

    /// Sets the pension contribution.
    pub fn with_pension(mut self, amount: Decimal) -> Self {
        self.pension = amount;
        self
    }

    /// Sets the NHF contribution.
    pub fn with_nhf(mut self, amount: Decimal) -> Self {
        self.nhf = amount;
        self
    }

    /// Sets the NHIS contribution.
    pub fn with_nhis(mut self, amount: Decimal) -> Self {
        self.nhis = amount;
        self
    }

    /// Sets the loan interest.
    pub fn with_loan_interest(mut self, amount: Decimal) -> Self {
        self.loan_interest = amount;
        self
    }

    /// Sets the life insurance premium.
    pub fn with_life_insurance(mut self, amount: Decimal) -> Self {
        self.life_insurance = amount;
        self
    }

    /// Sets the annual rent paid.
    pub fn with_annual_rent(mut self, amount: Decimal) -> Self {
        self.annual_rent = amount;
        self
    }

    /// Field values paired with their wire names.
    pub fn fields(&self) -> [(&'static str, Decimal); 7] {
        [
            ("grossIncome", self.gross_income),
            ("pension", self.pension),
            ("nhf", self.nhf),
            ("nhis", self.nhis),
            ("loanInterest", self.loan_interest),
            ("lifeInsurance", self.life_insurance),
            ("annualRent", self.annual_rent),
        ]
    }

    /// Checks that every amount is non-negative.
    ///
    /// Returns [`EngineError::InvalidInput`] naming the first negative field.
    pub fn validate(&self) -> EngineResult<()> {
        match self
            .fields()
            .into_iter()
            .find(|(_, value)| value.is_sign_negative() && !value.is_zero())
        {
            Some((field, value)) => Err(EngineError::invalid_input(
                field,
                format!("must not be negative (got {value})"),
            )),
            None => Ok(()),
        }
    }
}
