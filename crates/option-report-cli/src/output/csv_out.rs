use serde_json::Value;
use std::io;

use super::{format_value, summary_of, SUMMARY_FIELDS};

/// Write output as CSV to stdout: (Metric, Value) rows for a report
/// envelope, (field, value) rows otherwise.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(summary) = summary_of(value) {
        let _ = wtr.write_record(["Metric", "Value"]);
        for (key, label) in SUMMARY_FIELDS {
            let cell = summary.get(key).map(format_value).unwrap_or_default();
            let _ = wtr.write_record([label, &cell]);
        }
    } else if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_value(value)]);
    }

    let _ = wtr.flush();
}
