use rust_decimal::Decimal;

use crate::types::{DisclosureSummary, ValuedGrantRow};

/// Which quantity column weights the reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightBasis {
    Outstanding,
    Exercisable,
}

impl WeightBasis {
    fn weight(self, row: &ValuedGrantRow) -> Decimal {
        match self {
            WeightBasis::Outstanding => row.grant.outstanding,
            WeightBasis::Exercisable => row.grant.exercisable,
        }
    }
}

/// Share-weighted average: sum(w_i * v_i) / sum(w_i).
///
/// A zero total weight yields 0 rather than a division error. Rows are
/// never skipped; absent values must already be coerced to 0 by the value
/// accessor so the denominator stays the full weight sum.
pub fn weighted_average<F>(rows: &[ValuedGrantRow], basis: WeightBasis, value: F) -> Decimal
where
    F: Fn(&ValuedGrantRow) -> Decimal,
{
    let mut weighted = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;
    for row in rows {
        let w = basis.weight(row);
        weighted += w * value(row);
        total_weight += w;
    }

    if total_weight.is_zero() {
        Decimal::ZERO
    } else {
        weighted / total_weight
    }
}

/// Share-weighted sum: sum(w_i * v_i). Empty input yields 0.
pub fn weighted_sum<F>(rows: &[ValuedGrantRow], basis: WeightBasis, value: F) -> Decimal
where
    F: Fn(&ValuedGrantRow) -> Decimal,
{
    rows.iter()
        .fold(Decimal::ZERO, |acc, row| acc + basis.weight(row) * value(row))
}

fn exercise_price_or_zero(row: &ValuedGrantRow) -> Decimal {
    row.exercise_price_reporting.unwrap_or(Decimal::ZERO)
}

/// Reduce the valued register into the six disclosure metrics.
pub fn summarize(rows: &[ValuedGrantRow]) -> DisclosureSummary {
    use WeightBasis::{Exercisable, Outstanding};

    DisclosureSummary {
        weighted_avg_exercise_price_outstanding: weighted_average(
            rows,
            Outstanding,
            exercise_price_or_zero,
        ),
        weighted_avg_exercise_price_exercisable: weighted_average(
            rows,
            Exercisable,
            exercise_price_or_zero,
        ),
        weighted_avg_remaining_life_outstanding: weighted_average(rows, Outstanding, |r| {
            r.remaining_life_years
        }),
        weighted_avg_remaining_life_exercisable: weighted_average(rows, Exercisable, |r| {
            r.remaining_life_years
        }),
        aggregate_intrinsic_value_outstanding: weighted_sum(rows, Outstanding, |r| {
            r.intrinsic_value_per_unit
        }),
        aggregate_intrinsic_value_exercisable: weighted_sum(rows, Exercisable, |r| {
            r.intrinsic_value_per_unit
        }),
    }
}
