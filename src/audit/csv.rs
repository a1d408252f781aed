use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::event::AuditEvent;
use super::sink::AuditSink;

/// File written when `--audit-log` is given without a path.
pub const DEFAULT_LOG_FILE: &str = "_contact_log.csv";

/// Append-only audit log. Writes one `LEVEL; operation; component; message`
/// row per event.
///
/// The file (and its parent directories) is created on first write. Write
/// failures are reported through `tracing` and otherwise ignored.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &AuditEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create_dir_all {:?}", parent))?;
            }
        }

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open audit log {:?}", self.path))?;
        f.write_all(event.to_csv_row().as_bytes())
            .context("write audit row failed")?;
        f.write_all(b"\n").context("write newline failed")?;
        Ok(())
    }
}

impl AuditSink for CsvFileSink {
    fn record(&self, event: &AuditEvent) {
        if let Err(e) = self.append(event) {
            tracing::warn!(
                path = %self.path.display(),
                event_id = %event.id,
                "audit write failed: {e:#}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{BicycleType, Order};
    use crate::shop::Shop;

    #[test]
    fn appends_one_row_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("audit.csv");
        let sink = CsvFileSink::new(&path);

        sink.record(&AuditEvent::info(
            "repair",
            "Shop",
            "removed order Alice RACE from pending",
        ));
        sink.record(&AuditEvent::info(
            "deliver",
            "Shop",
            "removed order Alice RACE from completed",
        ));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "INFO; repair; Shop; removed order Alice RACE from pending",
                "INFO; deliver; Shop; removed order Alice RACE from completed",
            ]
        );
    }

    #[test]
    fn keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.csv");
        fs::write(&path, "INFO; repair; Shop; earlier run\n").unwrap();

        CsvFileSink::new(&path).record(&AuditEvent::info("deliver", "Shop", "later run"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("INFO; repair; Shop; earlier run\n"));
    }

    #[test]
    fn write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let sink = CsvFileSink::new(blocker.join("audit.csv"));

        sink.record(&AuditEvent::info("repair", "Shop", "lost"));

        assert!(!blocker.join("audit.csv").exists());
    }

    #[test]
    fn customer_name_cannot_forge_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.csv");
        let mut shop = Shop::new().with_audit(CsvFileSink::new(&path));
        let customer = "Eve RACE from pending\nSEVERE; deliver; Shop; forged";

        assert!(shop.accept(Order::new(customer, BicycleType::Race).unwrap()));
        assert!(shop.repair().is_some());

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let message = line.strip_prefix("INFO; repair; Shop; ").unwrap();
            assert!(!message.replace("\\;", "").contains(';'));
        }
        assert!(!content.contains("\nSEVERE"));
    }
}
