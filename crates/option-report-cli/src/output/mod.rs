pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod workbook;

use crate::OutputFormat;
use serde_json::Value;

use option_report_core::{
    METRIC_AIV_EXERCISABLE, METRIC_AIV_OUTSTANDING, METRIC_WAEP_EXERCISABLE,
    METRIC_WAEP_OUTSTANDING, METRIC_WARCL_EXERCISABLE, METRIC_WARCL_OUTSTANDING,
};

/// Serialized summary fields paired with their disclosure labels, in the
/// fixed presentation order. JSON objects sort keys alphabetically, so
/// every formatter iterates this instead of the raw object.
pub(crate) const SUMMARY_FIELDS: [(&str, &str); 6] = [
    ("weighted_avg_exercise_price_outstanding", METRIC_WAEP_OUTSTANDING),
    ("weighted_avg_exercise_price_exercisable", METRIC_WAEP_EXERCISABLE),
    ("weighted_avg_remaining_life_outstanding", METRIC_WARCL_OUTSTANDING),
    ("weighted_avg_remaining_life_exercisable", METRIC_WARCL_EXERCISABLE),
    ("aggregate_intrinsic_value_outstanding", METRIC_AIV_OUTSTANDING),
    ("aggregate_intrinsic_value_exercisable", METRIC_AIV_EXERCISABLE),
];

/// The summary object from a report envelope, if this value is one.
pub(crate) fn summary_of(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    value
        .as_object()?
        .get("result")?
        .as_object()?
        .get("summary")?
        .as_object()
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
