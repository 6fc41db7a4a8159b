use serde_json::Value;
use std::io;

use super::leaf_text;

/// Write output as two-column field/value CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            // Unwrap the computation envelope when present
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in fields {
                let _ = wtr.write_record([key.as_str(), &csv_text(val)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&csv_text(value)]);
        }
    }

    let _ = wtr.flush();
}

fn csv_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => leaf_text(other),
    }
}
