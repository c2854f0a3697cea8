//! Debate Orchestration: Scientist vs Philosopher turn loop
//!
//! Two participants alternate for a fixed number of rounds. Every
//! utterance passes the turn validator before it reaches the transcript;
//! after the last round the judge scores the transcript and produces a
//! verdict.
//!
//! # Debate Flow
//!
//! ```text
//! Idle → ScientistTurn → PhilosopherTurn → ScientistTurn → …
//!   │          │                │
//!   │          └──── (round N reached) ──→ Judging → Concluded
//!   │
//!   └─ protocol violation in any turn → Aborted
//! ```
//!
//! Odd rounds belong to the Scientist, even rounds to the Philosopher.
//! Each participant only sees the other side's memory.

pub mod graph;
pub mod judge;
pub mod orchestrator;
pub mod participant;
pub mod persistence;
pub mod state;
pub mod validator;

pub use graph::{DebateGraph, NodeKind};
pub use judge::{Judge, JudgeConfig, ScoringRubric, Verdict, Winner};
pub use orchestrator::{DebateConfig, DebateOrchestrator, DebateOutcome};
pub use participant::{Participant, PersonaParticipant, TurnContext, Utterance};
pub use persistence::{read_verdict, write_verdict};
pub use state::{
    DebateMemory, DebatePhase, DebateSession, DebateState, DebateTransition, Identity,
    TransitionError, Turn, VisibleMemory,
};
pub use validator::{ProtocolViolation, TurnValidator, ValidatorConfig, ViolationKind};
