//! Progressive tax bracket models.
//!
//! A [`TaxSchedule`] is an ordered list of [`TaxBracket`]s that partitions
//! taxable income `[0, ∞)` with no gaps or overlaps and with non-decreasing
//! rates. Schedules are validated on construction and immutable afterwards.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::format::{format_naira_whole, format_percent};

/// Band widths and rates of the Nigeria Tax Act 2025 personal income tax
/// table, lowest band first. `None` marks the unbounded top band.
pub const NTA_2025_BANDS: [(Option<Decimal>, Decimal); 6] = [
    (Some(dec!(800000)), dec!(0.00)),
    (Some(dec!(2200000)), dec!(0.15)),
    (Some(dec!(9000000)), dec!(0.18)),
    (Some(dec!(13000000)), dec!(0.21)),
    (Some(dec!(25000000)), dec!(0.23)),
    (None, dec!(0.25)),
];

static NTA_2025: LazyLock<TaxSchedule> = LazyLock::new(|| TaxSchedule {
    brackets: stack_bands(&NTA_2025_BANDS),
});

/// A single band of a progressive schedule.
///
/// # Example
///
/// ```
/// use paye_engine::models::TaxBracket;
/// use rust_decimal_macros::dec;
///
/// let bracket = TaxBracket {
///     lower_bound: dec!(800000),
///     width: Some(dec!(2200000)),
///     rate: dec!(0.15),
/// };
/// assert_eq!(bracket.upper_bound(), Some(dec!(3000000)));
/// assert_eq!(bracket.amount_within(dec!(1000000)), dec!(200000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    /// Taxable income at which this band starts.
    #[serde(with = "rust_decimal::serde::float")]
    pub lower_bound: Decimal,
    /// Width of the band; `None` for the unbounded top band.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub width: Option<Decimal>,
    /// Marginal rate as a fraction (0.15 is 15%).
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns the exclusive upper bound, or `None` when unbounded.
    ///
    /// Only validated brackets are guaranteed not to overflow here; see
    /// [`TaxSchedule::new`].
    pub fn upper_bound(&self) -> Option<Decimal> {
        self.width.map(|width| self.lower_bound + width)
    }

    fn checked_upper_bound(&self) -> EngineResult<Option<Decimal>> {
        match self.width {
            None => Ok(None),
            Some(width) => self.lower_bound.checked_add(width).map(Some).ok_or_else(|| {
                invalid(format!(
                    "band starting at {} overflows with width {}",
                    self.lower_bound, width
                ))
            }),
        }
    }

    /// Returns true for the open-ended top band.
    pub fn is_unbounded(&self) -> bool {
        self.width.is_none()
    }

    /// Returns the slice of `taxable_income` that falls inside this band.
    pub fn amount_within(&self, taxable_income: Decimal) -> Decimal {
        if taxable_income <= self.lower_bound {
            return Decimal::ZERO;
        }
        let above = taxable_income - self.lower_bound;
        match self.width {
            Some(width) => above.min(width),
            None => above,
        }
    }

    /// Returns the display label for this band at `position` in its schedule,
    /// e.g. `First ₦800,000 @ 0%`, `Next ₦2,200,000 @ 15%`,
    /// `Above ₦50,000,000 @ 25%`.
    pub fn label(&self, position: usize) -> String {
        let rate = format_percent(self.rate);
        match self.width {
            None => format!("Above {} @ {}", format_naira_whole(self.lower_bound), rate),
            Some(width) if position == 0 => {
                format!("First {} @ {}", format_naira_whole(width), rate)
            }
            Some(width) => format!("Next {} @ {}", format_naira_whole(width), rate),
        }
    }
}

/// A validated, ordered, progressive bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Creates a schedule from explicit brackets, checking that they
    /// partition `[0, ∞)` progressively.
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        validate(&brackets)?;
        Ok(Self { brackets })
    }

    /// Creates a schedule from `(width, rate)` bands, deriving each band's
    /// lower bound from the cumulative widths below it.
    ///
    /// # Example
    ///
    /// ```
    /// use paye_engine::models::{TaxSchedule, NTA_2025_BANDS};
    /// use rust_decimal_macros::dec;
    ///
    /// let schedule = TaxSchedule::from_widths(&NTA_2025_BANDS).unwrap();
    /// assert_eq!(schedule.brackets()[5].lower_bound, dec!(50000000));
    /// ```
    pub fn from_widths(bands: &[(Option<Decimal>, Decimal)]) -> EngineResult<Self> {
        if bands
            .iter()
            .rev()
            .skip(1)
            .any(|(width, _)| width.is_none())
        {
            return Err(invalid("only the last band may be unbounded"));
        }
        let mut total = Decimal::ZERO;
        for width in bands.iter().filter_map(|(width, _)| *width) {
            total = total
                .checked_add(width)
                .ok_or_else(|| invalid("cumulative band widths overflow"))?;
        }
        Self::new(stack_bands(bands))
    }

    /// The compiled-in Nigeria Tax Act 2025 schedule.
    pub fn nta_2025() -> &'static TaxSchedule {
        &NTA_2025
    }

    /// The brackets, lowest first.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Number of bands in the schedule.
    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false for a validated schedule.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

fn stack_bands(bands: &[(Option<Decimal>, Decimal)]) -> Vec<TaxBracket> {
    let mut lower_bound = Decimal::ZERO;
    bands
        .iter()
        .map(|&(width, rate)| {
            let bracket = TaxBracket {
                lower_bound,
                width,
                rate,
            };
            if let Some(width) = width {
                lower_bound += width;
            }
            bracket
        })
        .collect()
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidSchedule {
        message: message.into(),
    }
}

fn validate(brackets: &[TaxBracket]) -> EngineResult<()> {
    let Some(first) = brackets.first() else {
        return Err(invalid("schedule has no brackets"));
    };
    if !first.lower_bound.is_zero() {
        return Err(invalid(format!(
            "first band starts at {} instead of 0",
            first.lower_bound
        )));
    }

    let last_index = brackets.len() - 1;
    let mut previous: Option<&TaxBracket> = None;

    for (index, bracket) in brackets.iter().enumerate() {
        let band = index + 1;

        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(invalid(format!(
                "band {band} rate {} is outside [0, 1]",
                bracket.rate
            )));
        }

        if let Some(width) = bracket.width.filter(|width| *width <= Decimal::ZERO) {
            return Err(invalid(format!("band {band} has non-positive width {width}")));
        }
        match (bracket.is_unbounded(), index == last_index) {
            (false, true) => return Err(invalid("last band must be unbounded")),
            (true, false) => {
                return Err(invalid(format!("band {band} is unbounded but not last")));
            }
            _ => {}
        }

        if let Some(prev) = previous {
            let prev_upper = prev.checked_upper_bound()?;
            if prev_upper != Some(bracket.lower_bound) {
                return Err(invalid(format!(
                    "band {band} starts at {} but band {index} ends at {}",
                    bracket.lower_bound,
                    prev_upper.map_or_else(|| "∞".to_string(), |b| b.to_string())
                )));
            }
            if bracket.rate < prev.rate {
                return Err(invalid(format!(
                    "band {band} rate {} is lower than band {index} rate {}",
                    bracket.rate, prev.rate
                )));
            }
        }

        previous = Some(bracket);
    }

    Ok(())
}
