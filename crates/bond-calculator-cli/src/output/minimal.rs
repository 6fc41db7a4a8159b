use serde_json::Value;

use super::leaf_text;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "ytm",
        "ytc",
        "price",
        "floating_bond_price",
        "accrued_interest",
        "modified_duration",
        "pv01",
        "dv01",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", leaf_text(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, leaf_text(val));
            return;
        }
    }

    println!("{}", leaf_text(result_obj));
}
