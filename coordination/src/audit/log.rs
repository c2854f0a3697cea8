//! Audit sinks: the append-only log file and an in-memory collector.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{ArenaError, ArenaResult};

use super::entry::{AuditEntry, AuditEvent};

/// Destination for audit events. Entries must be kept in the order
/// they were recorded.
pub trait AuditSink {
    fn record(&mut self, event: AuditEvent) -> ArenaResult<()>;
}

/// Append-only audit file with explicit init/append/close lifecycle.
pub struct AuditLog {
    path: PathBuf,
    closed: bool,
}

impl AuditLog {
    /// Truncate (or create) the log at `path` and write the start marker.
    pub fn init(path: impl AsRef<Path>) -> ArenaResult<Self> {
        let path = path.as_ref().to_path_buf();
        File::create(&path).map_err(|e| ArenaError::audit_write(&path, e.to_string()))?;

        let mut log = Self {
            path,
            closed: false,
        };
        log.append(&AuditEvent::LogStarted)?;
        Ok(log)
    }

    /// Attach to an existing log without truncating it.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            closed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append one timestamped line.
    pub fn append(&mut self, event: &AuditEvent) -> ArenaResult<()> {
        if self.closed {
            return Err(ArenaError::AuditClosed {
                path: self.path.clone(),
            });
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ArenaError::audit_write(&self.path, e.to_string()))?;

        writeln!(file, "{}", AuditEntry::now(event).to_log_line())
            .map_err(|e| ArenaError::audit_write(&self.path, e.to_string()))?;

        Ok(())
    }

    /// Refuse any further appends.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Read every entry. Lines without a timestamp are folded into the
    /// preceding entry's message.
    pub fn read_all(&self) -> ArenaResult<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries: Vec<AuditEntry> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            match AuditEntry::from_log_line(&line) {
                Some(entry) => entries.push(entry),
                None => {
                    if let Some(last) = entries.last_mut() {
                        last.message.push('\n');
                        last.message.push_str(&line);
                    }
                }
            }
        }

        Ok(entries)
    }

    /// Read the last `n` entries.
    pub fn read_last(&self, n: usize) -> ArenaResult<Vec<AuditEntry>> {
        let entries = self.read_all()?;
        let start = entries.len().saturating_sub(n);
        Ok(entries[start..].to_vec())
    }
}

impl AuditSink for AuditLog {
    fn record(&mut self, event: AuditEvent) -> ArenaResult<()> {
        self.append(&event)
    }
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Vec<AuditEntry>,
    events: Vec<AuditEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Rendered messages, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }
}

impl AuditSink for MemorySink {
    fn record(&mut self, event: AuditEvent) -> ArenaResult<()> {
        self.entries.push(AuditEntry::now(&event));
        self.events.push(event);
        Ok(())
    }
}
