use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read a JSON file and deserialize it into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("File not found: {}", path).into());
    }
    if !p.is_file() {
        return Err(format!("Not a file: {}", path).into());
    }

    let contents =
        fs::read_to_string(p).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", path, e))?;
    Ok(value)
}

/// Read JSON from stdin when data is being piped; None on an interactive TTY.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Resolve a command's input: an explicit `--input` file wins, then piped
/// stdin; otherwise the command cannot run.
pub fn read_input<T: DeserializeOwned>(
    path: &Option<String>,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return read_json(path);
    }

    if let Some(value) = read_stdin()? {
        return Ok(serde_json::from_value(value)?);
    }

    Err(format!("--input <file.json> or piped stdin required for {}", command).into())
}
