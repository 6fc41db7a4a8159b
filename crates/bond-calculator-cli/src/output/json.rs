use serde_json::Value;

/// Render the full valuation payload as pretty-printed JSON on stdout.
/// This is the only format that carries the complete metadata envelope.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("Failed to render JSON output: {e}"),
    }
}
