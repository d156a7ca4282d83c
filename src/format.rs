//! Display formatting for Naira amounts and rates.
//!
//! The calculator never rounds; these helpers are for presentation only.

use rust_decimal::{Decimal, RoundingStrategy};

/// The Naira sign.
pub const NAIRA: &str = "₦";

/// Rounds to two decimal places, half away from zero.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as Naira with thousands separators and two decimals.
///
/// ```
/// use paye_engine::format::format_naira;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_naira(dec!(1950000)), "₦1,950,000.00");
/// assert_eq!(format_naira(dec!(27500.005)), "₦27,500.01");
/// ```
pub fn format_naira(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{NAIRA}{}", group_thousands(&format!("{:.2}", rounded.abs())))
}

/// Formats an amount as Naira without padding decimals, e.g. `₦800,000`.
pub fn format_naira_whole(amount: Decimal) -> String {
    format!("{NAIRA}{}", group_thousands(&amount.normalize().to_string()))
}

/// Formats a fractional rate as a percentage, e.g. `0.15` as `15%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn group_thousands(digits: &str) -> String {
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
