use crate::db::store::Collection;
use crate::errors::AppResult;
use crate::models::log_entry::LogEntry;
use crate::ui::messages::warning;
use chrono::Local;

/// Append an internal log line to the `log` collection.
pub fn ttlog(
    log: &Collection<LogEntry>,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    // Timestamp locale, formattato in ISO 8601
    let now = Local::now().to_rfc3339();

    log.update(|entries| {
        let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        entries.push(LogEntry {
            id,
            date: now,
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });
        Ok(())
    })
}

/// Same as [`ttlog`], failures only produce a warning.
pub fn ttlog_quiet(log: &Collection<LogEntry>, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(log, operation, target, message) {
        tracing::warn!(error = %e, operation, "audit log write failed");
        warning(format!("Failed to write internal log: {e}"));
    }
}
