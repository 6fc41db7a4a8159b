use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::leaf_text;

/// Format output as a field/value table using the tabled crate.
///
/// Valuation results arrive wrapped in an envelope with a "result" object;
/// the table shows the result fields, then warnings and methodology below.
/// Flat objects (price, accrued) are tabled directly.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            print_rows(result);

            if let Some(Value::Array(warnings)) = map.get("warnings") {
                if !warnings.is_empty() {
                    println!("\nWarnings:");
                    for warning in warnings {
                        if let Value::String(s) = warning {
                            println!("  - {}", s);
                        }
                    }
                }
            }

            if let Some(Value::String(methodology)) = map.get("methodology") {
                println!("\nMethodology: {}", methodology);
            }
        }
        _ => print_rows(map),
    }
}

fn print_rows(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &leaf_text(val)]);
    }
    println!("{}", Table::from(builder));
}
