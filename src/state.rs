use crate::errors::{Result, TicketError};
use crate::models::ticket::RawTicket;
use serde_json::Value;
use std::path::Path;

pub fn write_raw(path: &Path, ticket: &RawTicket) -> Result<()> {
    let json = serde_json::to_string_pretty(ticket)?;
    write_file(path, &json)
}

/// Reads the fetcher output back as an untyped document.
pub fn read_raw(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(TicketError::InputNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| TicketError::InvalidPayload {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_markdown(path: &Path, markdown: &str) -> Result<()> {
    write_file(path, markdown)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, content)?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
