//! JSON export of the message history

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Result, ResultExt};
use crate::events::MessageEvent;

/// `lightning-messages-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("lightning-messages-{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON array of the given events
pub fn export_json(events: &[MessageEvent]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Parse a previously exported history
pub fn parse_export(text: &str) -> Result<Vec<MessageEvent>> {
    Ok(serde_json::from_str(text)?)
}

/// Write the export into `dir`, creating it if needed. Returns the file path.
pub fn write_export(dir: &Path, events: &[MessageEvent], date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join(export_file_name(date));
    let body = export_json(events)?;
    std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!("Exported {} message(s) to {}", events.len(), path.display());
    Ok(path)
}
