//! Debate Arena Library
//!
//! This library provides:
//! - A two-participant debate loop with strict turn alternation
//! - A turn validator rejecting out-of-turn, duplicate and incoherent turns
//! - A keyword-scoring judge producing a JSON verdict
//! - An append-only audit log of every step
//!
//! # Usage
//!
//! ```no_run
//! use arena_coordination::audit::AuditLog;
//! use arena_coordination::debate::{DebateOrchestrator, Identity, PersonaParticipant};
//!
//! # fn main() -> arena_coordination::ArenaResult<()> {
//! let scientist = PersonaParticipant::for_identity(Identity::Scientist);
//! let philosopher = PersonaParticipant::for_identity(Identity::Philosopher);
//! let mut log = AuditLog::init("debate.log")?;
//!
//! let outcome = DebateOrchestrator::new()
//!     .run("AI regulation", [&scientist, &philosopher], &mut log)?;
//! println!("{}", outcome.summary_line());
//! # Ok(())
//! # }
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod audit;
pub mod debate;
pub mod error;

// Re-export key error types
pub use error::{ArenaError, ArenaResult};

// Re-export key audit types
pub use audit::{AuditEntry, AuditEvent, AuditLog, AuditSink, MemorySink};

// Re-export key debate types
pub use debate::{
    DebateConfig, DebateGraph, DebateMemory, DebateOrchestrator, DebateOutcome, DebatePhase,
    DebateSession, Identity, Judge, JudgeConfig, NodeKind, Participant, PersonaParticipant,
    ProtocolViolation, ScoringRubric, Turn, TurnContext, TurnValidator, Utterance,
    ValidatorConfig, Verdict, ViolationKind, Winner,
};
