//! Audit trail for debate runs.
//!
//! Every state transition of a debate is observable through an
//! [`AuditSink`]. The file-backed [`AuditLog`] writes one timestamped line
//! per event (`[YYYY-MM-DD HH:MM:SS] <message>`); [`MemorySink`] keeps
//! entries in memory for tests and embedding.

pub mod entry;
pub mod log;

pub use entry::{AuditEntry, AuditEvent};
pub use log::{AuditLog, AuditSink, MemorySink};
