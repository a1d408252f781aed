mod csv;
mod event;
mod sink;

pub use csv::{CsvFileSink, DEFAULT_LOG_FILE};
pub use event::{AuditEvent, AuditLevel};
pub use sink::{AuditSink, MemorySink, NullSink, TracingSink};
