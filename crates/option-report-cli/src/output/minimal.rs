use serde_json::Value;

use super::{format_value, summary_of, SUMMARY_FIELDS};

/// Print just the answer values.
///
/// For a report envelope that is the six metrics in disclosure order, one
/// per line. For other outputs, a priority list of well-known fields, then
/// the first field as a fallback.
pub fn print_minimal(value: &Value) {
    if let Some(summary) = summary_of(value) {
        for (key, _) in SUMMARY_FIELDS {
            let cell = summary.get(key).map(format_value).unwrap_or_default();
            println!("{}", cell);
        }
        return;
    }

    let priority_keys = ["converted", "price"];

    if let Value::Object(map) = value {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(value));
}
