use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_value, summary_of, SUMMARY_FIELDS};

/// Format output as a table using the tabled crate.
///
/// Report envelopes render the six summary metrics in disclosure order,
/// followed by warnings and methodology. Anything else falls back to a
/// flat field/value table.
pub fn print_table(value: &Value) {
    if let Some(summary) = summary_of(value) {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        for (key, label) in SUMMARY_FIELDS {
            let cell = summary.get(key).map(format_value).unwrap_or_default();
            builder.push_record([label, &cell]);
        }
        println!("{}", Table::from(builder));

        print_envelope_notes(value);
        return;
    }

    print_flat_object(value);
}

fn print_envelope_notes(value: &Value) {
    let envelope = match value.as_object() {
        Some(map) => map,
        None => return,
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}
