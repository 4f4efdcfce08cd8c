//! Rounding and clamping helpers shared by the regime calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to two decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(9.225)), dec!(9.23));
/// assert_eq!(round_half_up(dec!(9.224)), dec!(9.22));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero from below.
///
/// Used wherever a subtraction or a caller-supplied amount could go
/// negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-5)), dec!(0));
/// assert_eq!(non_negative(dec!(5)), dec!(5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamps a deduction claim into `[0, cap]`.
pub fn capped(
    claimed: Decimal,
    cap: Decimal,
) -> Decimal {
    non_negative(claimed).min(cap)
}

/// `part / whole * 100` rounded to two places, or zero when `whole` is not
/// positive.
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(part / whole * Decimal::ONE_HUNDRED)
}
