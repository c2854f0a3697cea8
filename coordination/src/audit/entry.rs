//! Audit events and their log-line encoding.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::debate::state::Identity;

/// Timestamp layout of an audit line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Something worth recording about a debate run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Log file was (re)created
    LogStarted,
    /// A graph node came up
    NodeInitialized { node: String },
    /// Topic typed at the CLI
    TopicInput { topic: String },
    /// Topic accepted by the input node
    TopicReceived { node: String, topic: String },
    /// Diagram file written
    DiagramWritten { path: String },
    /// First round is about to run
    DebateStarted { session_id: String, total_rounds: u32 },
    /// Raw output of a participant, before validation
    ArgumentProduced { node: String, argument: String },
    /// Turn accepted into the transcript
    TurnRecorded {
        round: u32,
        speaker: Identity,
        argument: String,
    },
    /// Turn appended to the speaker's memory
    MemoryUpdate {
        round: u32,
        speaker: Identity,
        snippet: String,
    },
    /// Memory handed to the judge, as JSON
    MemorySnapshot { memory: String },
    /// Judge received the transcript
    JudgeReceived { entries: usize },
    /// Judge decided
    Judgment { winner: String, reason: String },
    /// Judge summary text
    JudgeSummary { summary: String },
    /// Protocol violation that ended the debate
    ProtocolError { message: String },
    /// Verdict file written
    VerdictWritten { path: String },
    /// Topic entry was cancelled
    UserAbort,
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogStarted => write!(f, "--- debate log started ---"),
            Self::NodeInitialized { node } => write!(f, "Node[{}] initialized", node),
            Self::TopicInput { topic } => write!(f, "CLI topic input: {}", topic),
            Self::TopicReceived { node, topic } => {
                write!(f, "Node[{}] received topic: {}", node, topic)
            }
            Self::DiagramWritten { path } => write!(f, "Wrote {}", path),
            Self::DebateStarted {
                session_id,
                total_rounds,
            } => write!(
                f,
                "Debate started (session {}, {} rounds)",
                session_id, total_rounds
            ),
            Self::ArgumentProduced { node, argument } => {
                write!(f, "Node[{}] produced argument: \"{}\"", node, argument)
            }
            Self::TurnRecorded {
                round,
                speaker,
                argument,
            } => write!(f, "[Round {}] {}: {}", round, speaker, argument),
            Self::MemoryUpdate {
                round,
                speaker,
                snippet,
            } => write!(f, "[Round {}] Memory update for {}: {}", round, speaker, snippet),
            Self::MemorySnapshot { memory } => write!(f, "Node[MemoryNode] snapshot: {}", memory),
            Self::JudgeReceived { entries } => write!(
                f,
                "Node[JudgeNode] received transcript of {} entries",
                entries
            ),
            Self::Judgment { winner, reason } => write!(
                f,
                "Node[JudgeNode] judgment: Winner={}; Reason={}",
                winner, reason
            ),
            Self::JudgeSummary { summary } => write!(f, "Node[JudgeNode] summary: {}", summary),
            Self::ProtocolError { message } => write!(f, "ERROR: {}", message),
            Self::VerdictWritten { path } => write!(f, "Verdict written to {}", path),
            Self::UserAbort => write!(f, "Aborted by user"),
        }
    }
}

/// A timestamped audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl AuditEntry {
    /// Stamp an event with the current local time.
    pub fn now(event: &AuditEvent) -> Self {
        Self {
            timestamp: Local::now(),
            message: event.to_string(),
        }
    }

    /// Format as `[YYYY-MM-DD HH:MM:SS] message`
    pub fn to_log_line(&self) -> String {
        format!(
            "[{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.message
        )
    }

    /// Parse a line written by [`AuditEntry::to_log_line`].
    ///
    /// Returns `None` for lines without a leading timestamp (continuations
    /// of a multi-line message).
    pub fn from_log_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (stamp, message) = rest.split_once("] ")?;
        let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        let timestamp = Local.from_local_datetime(&naive).earliest()?;

        Some(Self {
            timestamp,
            message: message.to_string(),
        })
    }
}
