use rust_decimal::Decimal;

use crate::types::Money;

/// Per-unit intrinsic value: max(closing - exercise price, 0).
///
/// An absent reporting-currency exercise price is treated as 0, which
/// floors the row's intrinsic value at the full closing price. Known
/// accuracy caveat carried over from the production behaviour; the report
/// pipeline emits a warning when any row takes this path.
pub fn intrinsic_value_per_unit(
    closing_price: Money,
    exercise_price_reporting: Option<Money>,
) -> Money {
    let exercise = exercise_price_reporting.unwrap_or(Decimal::ZERO);
    (closing_price - exercise).max(Decimal::ZERO)
}
