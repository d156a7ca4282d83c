//! Rent relief calculation.
//!
//! Rent relief is the lower of a fixed percentage of annual rent paid and an
//! absolute cap. It is the only relief that is not a pass-through of the
//! supplied amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Share of annual rent that is deductible.
pub const RENT_RELIEF_RATE: Decimal = dec!(0.20);

/// Ceiling on rent relief, in Naira.
pub const RENT_RELIEF_CAP: Decimal = dec!(500000);

/// Percentage and cap used to derive rent relief.
///
/// # Example
///
/// ```
/// use paye_engine::calculation::RentReliefRule;
/// use rust_decimal_macros::dec;
///
/// let rule = RentReliefRule::default();
/// assert_eq!(rule.relief_for(dec!(1000000)), dec!(200000));
/// assert_eq!(rule.relief_for(dec!(10000000)), dec!(500000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentReliefRule {
    /// Fraction of annual rent that is deductible.
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Maximum relief.
    #[serde(with = "rust_decimal::serde::float")]
    pub cap: Decimal,
}

impl Default for RentReliefRule {
    fn default() -> Self {
        Self {
            rate: RENT_RELIEF_RATE,
            cap: RENT_RELIEF_CAP,
        }
    }
}

impl RentReliefRule {
    /// Returns `min(rate × annual_rent, cap)`.
    ///
    /// A product too large to represent is necessarily above the cap.
    pub fn relief_for(&self, annual_rent: Decimal) -> Decimal {
        let uncapped = annual_rent.checked_mul(self.rate).unwrap_or(Decimal::MAX);
        let relief = uncapped.min(self.cap);
        debug!(
            annual_rent = %annual_rent,
            uncapped = %uncapped,
            relief = %relief,
            cap_applied = uncapped > self.cap,
            "Rent relief derived"
        );
        relief
    }
}

/// Rent relief under the default rate and cap.
pub fn calculate_rent_relief(annual_rent: Decimal) -> Decimal {
    RentReliefRule::default().relief_for(annual_rent)
}
