use std::path::Path;

use anyhow::{Context, Result};
use convoguard_core::Message;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{output}");
    Ok(())
}

pub fn write_transcript(path: &Path, messages: &[Message]) -> Result<()> {
    let output = serde_json::to_string_pretty(messages)?;
    std::fs::write(path, output)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))
}
