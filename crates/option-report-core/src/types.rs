use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// FX rates expressed as reporting-currency units per foreign unit.
pub type Rate = Decimal;

/// Year fractions (Actual/365)
pub type Years = Decimal;

/// User-supplied FX rates into the reporting currency (USD).
/// A rate of 0 means "no conversion available" — conversion is opt-in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FxRates {
    pub eur_usd: Rate,
    pub gbp_usd: Rate,
    pub ils_usd: Rate,
}

/// Scalar parameters for one report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParameters {
    /// Measurement date the disclosure is prepared as of.
    pub report_date: NaiveDate,
    /// Reference closing price of the underlying, reporting currency.
    pub closing_price: Money,
    pub fx_rates: FxRates,
}

/// One option grant/tranche from the grant register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrantRow {
    /// Exercise price in grant-currency units. Absent cells stay absent
    /// here and are coerced to 0 only at aggregation.
    pub exercise_price: Option<Money>,
    /// Raw currency code as it appears in the register (e.g. "EUR", "nis ").
    pub exercise_price_currency: String,
    /// Options outstanding at the report date.
    pub outstanding: Decimal,
    /// Options vested and exercisable at the report date.
    pub exercisable: Decimal,
    pub employment_termination_date: Option<NaiveDate>,
    pub original_expiry_date: Option<NaiveDate>,
    pub updated_expiry_date: Option<NaiveDate>,
}

/// A grant row with its derived valuation fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedGrantRow {
    #[serde(flatten)]
    pub grant: GrantRow,
    /// Exercise price converted into the reporting currency.
    pub exercise_price_reporting: Option<Money>,
    /// Remaining contractual life in years, Actual/365, >= 0.
    pub remaining_life_years: Years,
    /// max(closing - exercise price), floored at 0.
    pub intrinsic_value_per_unit: Money,
}

pub const METRIC_WAEP_OUTSTANDING: &str = "Weighted Average Exercise Price - Outstanding";
pub const METRIC_WAEP_EXERCISABLE: &str = "Weighted Average Exercise Price - Exercisable";
pub const METRIC_WARCL_OUTSTANDING: &str =
    "Weighted Average Remaining Contractual Life - Outstanding";
pub const METRIC_WARCL_EXERCISABLE: &str =
    "Weighted Average Remaining Contractual Life - Exercisable";
pub const METRIC_AIV_OUTSTANDING: &str = "Aggregate Intrinsic Value - Outstanding";
pub const METRIC_AIV_EXERCISABLE: &str = "Aggregate Intrinsic Value - Exercisable";

/// The six disclosure metrics. Presentation order is fixed by `metrics()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisclosureSummary {
    pub weighted_avg_exercise_price_outstanding: Money,
    pub weighted_avg_exercise_price_exercisable: Money,
    pub weighted_avg_remaining_life_outstanding: Years,
    pub weighted_avg_remaining_life_exercisable: Years,
    pub aggregate_intrinsic_value_outstanding: Money,
    pub aggregate_intrinsic_value_exercisable: Money,
}

impl DisclosureSummary {
    /// The six metrics in disclosure order. Consumers rendering the
    /// summary must iterate this, not the serialized field order.
    pub fn metrics(&self) -> [(&'static str, Decimal); 6] {
        [
            (
                METRIC_WAEP_OUTSTANDING,
                self.weighted_avg_exercise_price_outstanding,
            ),
            (
                METRIC_WAEP_EXERCISABLE,
                self.weighted_avg_exercise_price_exercisable,
            ),
            (
                METRIC_WARCL_OUTSTANDING,
                self.weighted_avg_remaining_life_outstanding,
            ),
            (
                METRIC_WARCL_EXERCISABLE,
                self.weighted_avg_remaining_life_exercisable,
            ),
            (
                METRIC_AIV_OUTSTANDING,
                self.aggregate_intrinsic_value_outstanding,
            ),
            (
                METRIC_AIV_EXERCISABLE,
                self.aggregate_intrinsic_value_exercisable,
            ),
        ]
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
