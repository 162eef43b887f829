//! Currency rounding.
//!
//! Every paid component is rounded to whole won on its own, half away from
//! zero, before it takes part in any later sum.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole currency units, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_won;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_won(Decimal::new(68861625, 4)), Decimal::from(6886));
/// assert_eq!(round_won(Decimal::new(25, 1)), Decimal::from(3));
/// ```
pub fn round_won(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
