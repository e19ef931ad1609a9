use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::aggregate;
use crate::contractual_life::remaining_contractual_life;
use crate::currency::{self, CurrencyClass, ILS_CONVERSION_FLOOR};
use crate::error::OptionReportError;
use crate::intrinsic::intrinsic_value_per_unit;
use crate::types::{
    with_metadata, ComputationOutput, DisclosureSummary, GrantRow, ReportParameters,
    ValuedGrantRow,
};
use crate::OptionReportResult;

/// Input for one outstanding-report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    /// Normalized grant register (see `schema::normalize_register`).
    pub register: Vec<GrantRow>,
    pub parameters: ReportParameters,
}

/// Output of one outstanding-report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    /// The register with derived valuation columns, original order.
    pub rows: Vec<ValuedGrantRow>,
    pub summary: DisclosureSummary,
}

/// Run the full disclosure pipeline: currency normalization, contractual
/// life, intrinsic value, then the weighted reduction into six metrics.
///
/// Stateless single pass; derived fields depend only on the row and the
/// report parameters. Row-level anomalies degrade to 0/absent and are
/// rolled up into warnings; only parameter problems are run-fatal.
pub fn run_outstanding_report(
    input: &ReportInput,
) -> OptionReportResult<ComputationOutput<ReportOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let params = &input.parameters;

    // -- Validation --
    if params.closing_price < Decimal::ZERO {
        return Err(OptionReportError::InvalidInput {
            field: "closing_price".into(),
            reason: "Closing price must be non-negative".into(),
        });
    }
    for (field, rate) in [
        ("eur_usd", params.fx_rates.eur_usd),
        ("gbp_usd", params.fx_rates.gbp_usd),
        ("ils_usd", params.fx_rates.ils_usd),
    ] {
        if rate < Decimal::ZERO {
            return Err(OptionReportError::InvalidInput {
                field: field.into(),
                reason: "FX rates must be non-negative (0 disables conversion)".into(),
            });
        }
    }

    if params.closing_price.is_zero() {
        warnings.push("Closing price is 0: every intrinsic value will be 0".to_string());
    }
    if input.register.is_empty() {
        warnings.push("Grant register is empty: all metrics are 0".to_string());
    }

    // -- Per-row valuation --
    let mut unconverted_rows = 0usize;
    let mut unpriced_rows = 0usize;

    let rows: Vec<ValuedGrantRow> = input
        .register
        .iter()
        .map(|grant| {
            let exercise_price_reporting = currency::to_reporting_currency(
                grant.exercise_price,
                &grant.exercise_price_currency,
                &params.fx_rates,
            );

            if grant.exercise_price.is_none() {
                unpriced_rows += 1;
            } else if missing_rate(grant, params) {
                unconverted_rows += 1;
            }

            let remaining_life_years = remaining_contractual_life(
                params.report_date,
                grant.employment_termination_date,
                grant.original_expiry_date,
                grant.updated_expiry_date,
            );

            let intrinsic_value_per_unit =
                intrinsic_value_per_unit(params.closing_price, exercise_price_reporting);

            ValuedGrantRow {
                grant: grant.clone(),
                exercise_price_reporting,
                remaining_life_years,
                intrinsic_value_per_unit,
            }
        })
        .collect();

    if unpriced_rows > 0 {
        warnings.push(format!(
            "{unpriced_rows} row(s) have no parsable exercise price; \
             their intrinsic value is floored at the closing price"
        ));
    }
    if unconverted_rows > 0 {
        warnings.push(format!(
            "{unconverted_rows} row(s) carry a foreign currency with no rate supplied; \
             exercise prices left unconverted"
        ));
    }

    let summary = aggregate::summarize(&rows);
    let output = ReportOutput { rows, summary };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Share-weighted disclosure metrics over the grant register \
         (Actual/365 contractual life, intrinsic value floored at 0)",
        &serde_json::json!({
            "report_date": params.report_date.to_string(),
            "closing_price": params.closing_price.to_string(),
            "eur_usd": params.fx_rates.eur_usd.to_string(),
            "gbp_usd": params.fx_rates.gbp_usd.to_string(),
            "ils_usd": params.fx_rates.ils_usd.to_string(),
            "register_rows": input.register.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// True when the row names a convertible currency but its rate is 0.
fn missing_rate(grant: &GrantRow, params: &ReportParameters) -> bool {
    let price = match grant.exercise_price {
        Some(p) => p,
        None => return false,
    };
    match currency::classify(&grant.exercise_price_currency) {
        CurrencyClass::Eur => params.fx_rates.eur_usd.is_zero(),
        CurrencyClass::Gbp => params.fx_rates.gbp_usd.is_zero(),
        CurrencyClass::Ils => price > ILS_CONVERSION_FLOOR && params.fx_rates.ils_usd.is_zero(),
        CurrencyClass::Reporting | CurrencyClass::Other => false,
    }
}
