use serde::{Deserialize, Serialize};

/// One row of the internal audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u32,
    /// RFC 3339, local time
    pub date: String,
    pub operation: String,
    #[serde(default)]
    pub target: String,
    pub message: String,
}
