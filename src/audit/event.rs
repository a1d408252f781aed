use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditLevel {
    Info,
    Warning,
    Severe,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditLevel::Info => write!(f, "INFO"),
            AuditLevel::Warning => write!(f, "WARNING"),
            AuditLevel::Severe => write!(f, "SEVERE"),
        }
    }
}

/// One entry in the shop's audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub level: AuditLevel,
    /// Name of the operation that produced the event (`repair`, `deliver`).
    pub operation: String,
    /// Component the operation belongs to.
    pub component: String,
    pub message: String,
}

impl AuditEvent {
    pub fn new(
        level: AuditLevel,
        operation: impl Into<String>,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            level,
            operation: operation.into(),
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn info(
        operation: impl Into<String>,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(AuditLevel::Info, operation, component, message)
    }

    /// Render as a `LEVEL; operation; component; message` row, without newline.
    ///
    /// Backslashes, `;`, `\n` and `\r` inside fields are escaped so that one
    /// event always occupies exactly one four-column row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{}; {}; {}; {}",
            self.level,
            escape_field(&self.operation),
            escape_field(&self.component),
            escape_field(&self.message)
        )
    }
}

fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
