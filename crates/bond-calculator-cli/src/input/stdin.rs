use serde_json::Value;
use std::io::{self, Read};

/// Read a piped JSON request body from stdin.
///
/// Interactive sessions (stdin is a TTY) and empty pipes yield `None` so
/// the caller can demand `--input <file>` instead of hanging on a read.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let body = buffer.trim();
    if body.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(body)?))
}
