//! Debate state: identities, turns, memory, and the session phase machine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the two fixed debate roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Identity {
    /// Opens the debate; speaks on odd rounds.
    Scientist,
    /// Speaks on even rounds.
    Philosopher,
}

impl Identity {
    /// Both identities in speaking order.
    pub const ALL: [Identity; 2] = [Identity::Scientist, Identity::Philosopher];

    /// The identity that speaks on round 1.
    pub fn first() -> Self {
        Self::Scientist
    }

    /// The opposing identity.
    pub fn other(self) -> Self {
        match self {
            Self::Scientist => Self::Philosopher,
            Self::Philosopher => Self::Scientist,
        }
    }

    /// Expected speaker under strict alternation starting with [`Identity::first`].
    pub fn expected_for_round(round: u32) -> Self {
        if round % 2 == 1 {
            Self::first()
        } else {
            Self::first().other()
        }
    }

    /// Node name of the agent playing this identity.
    pub fn agent_name(self) -> &'static str {
        match self {
            Self::Scientist => "AgentA",
            Self::Philosopher => "AgentB",
        }
    }

    /// Human-readable role label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Scientist => "Scientist",
            Self::Philosopher => "Philosopher",
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single accepted contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Round number (1-indexed).
    pub round: u32,
    /// Who spoke.
    pub speaker: Identity,
    /// What was said.
    pub utterance: String,
}

impl Turn {
    pub fn new(round: u32, speaker: Identity, utterance: impl Into<String>) -> Self {
        Self {
            round,
            speaker,
            utterance: utterance.into(),
        }
    }
}

/// Per-identity history of accepted turns.
///
/// Both identities are always present, possibly with an empty history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebateMemory {
    entries: BTreeMap<Identity, Vec<Turn>>,
}

impl Default for DebateMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateMemory {
    pub fn new() -> Self {
        Self {
            entries: Identity::ALL.iter().map(|id| (*id, Vec::new())).collect(),
        }
    }

    /// Rebuild memory from a transcript.
    pub fn from_transcript(transcript: &[Turn]) -> Self {
        let mut memory = Self::new();
        for turn in transcript {
            memory.record(turn.clone());
        }
        memory
    }

    /// Turns authored by `identity`, in order.
    pub fn turns_for(&self, identity: Identity) -> &[Turn] {
        self.entries
            .get(&identity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// What `speaker` is allowed to see: only the other identity's turns.
    pub fn visible_to(&self, speaker: Identity) -> VisibleMemory<'_> {
        let owner = speaker.other();
        VisibleMemory {
            owner,
            turns: self.turns_for(owner),
        }
    }

    /// Total turns across both identities.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn record(&mut self, turn: Turn) {
        self.entries.entry(turn.speaker).or_default().push(turn);
    }
}

/// Read-only projection of the opposing side's memory.
#[derive(Debug, Clone, Copy)]
pub struct VisibleMemory<'a> {
    owner: Identity,
    turns: &'a [Turn],
}

impl<'a> VisibleMemory<'a> {
    /// Identity whose turns are visible.
    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn turns(&self) -> &'a [Turn] {
        self.turns
    }

    /// Most recent visible turn.
    pub fn latest(&self) -> Option<&'a Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Shared debate state, written only by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateState {
    topic: String,
    transcript: Vec<Turn>,
    memory: DebateMemory,
}

impl DebateState {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            transcript: Vec::new(),
            memory: DebateMemory::new(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn memory(&self) -> &DebateMemory {
        &self.memory
    }

    /// Memory projection for `speaker`.
    pub fn visible_memory(&self, speaker: Identity) -> VisibleMemory<'_> {
        self.memory.visible_to(speaker)
    }

    /// Append an accepted turn to the transcript and its speaker's memory.
    pub(crate) fn record(&mut self, turn: Turn) {
        debug_assert_eq!(turn.round as usize, self.transcript.len() + 1);
        self.memory.record(turn.clone());
        self.transcript.push(turn);
    }

    /// Consume the state, yielding transcript and memory.
    pub fn into_parts(self) -> (Vec<Turn>, DebateMemory) {
        (self.transcript, self.memory)
    }
}

/// Phase of a debate session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebatePhase {
    /// Session created, topic not yet accepted.
    Idle,
    /// Scientist is producing an argument.
    ScientistTurn,
    /// Philosopher is producing an argument.
    PhilosopherTurn,
    /// All rounds recorded, judge is scoring.
    Judging,
    /// Verdict produced.
    Concluded,
    /// Halted by a protocol violation or user abort.
    Aborted,
}

impl DebatePhase {
    /// Turn phase for `identity`.
    pub fn turn_of(identity: Identity) -> Self {
        match identity {
            Identity::Scientist => Self::ScientistTurn,
            Identity::Philosopher => Self::PhilosopherTurn,
        }
    }

    /// Whether this is a terminal phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Concluded | Self::Aborted)
    }

    /// Valid transitions from this phase.
    pub fn valid_transitions(self) -> &'static [DebatePhase] {
        match self {
            Self::Idle => &[Self::ScientistTurn, Self::Judging, Self::Aborted],
            Self::ScientistTurn => &[Self::PhilosopherTurn, Self::Judging, Self::Aborted],
            Self::PhilosopherTurn => &[Self::ScientistTurn, Self::Judging, Self::Aborted],
            Self::Judging => &[Self::Concluded],
            Self::Concluded | Self::Aborted => &[],
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::ScientistTurn => write!(f, "scientist_turn"),
            Self::PhilosopherTurn => write!(f, "philosopher_turn"),
            Self::Judging => write!(f, "judging"),
            Self::Concluded => write!(f, "concluded"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// A phase transition record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateTransition {
    pub from: DebatePhase,
    pub to: DebatePhase,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}

/// Error for invalid state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: DebatePhase,
    pub to: DebatePhase,
    pub reason: String,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid transition {} -> {}: {}",
            self.from, self.to, self.reason
        )
    }
}

impl std::error::Error for TransitionError {}

/// Phase bookkeeping for one debate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateSession {
    /// Unique session identifier.
    pub id: String,
    pub phase: DebatePhase,
    /// Current round number (0 before the first turn).
    pub current_round: u32,
    pub total_rounds: u32,
    pub transitions: Vec<DebateTransition>,
    pub created_at: DateTime<Utc>,
    pub topic: String,
}

impl DebateSession {
    pub fn new(topic: &str, total_rounds: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            phase: DebatePhase::Idle,
            current_round: 0,
            total_rounds,
            transitions: Vec::new(),
            created_at: Utc::now(),
            topic: topic.to_string(),
        }
    }

    /// Transition to a new phase with a reason.
    pub fn transition(&mut self, to: DebatePhase, reason: &str) -> Result<(), TransitionError> {
        if !self.phase.valid_transitions().contains(&to) {
            return Err(TransitionError {
                from: self.phase,
                to,
                reason: format!(
                    "not a valid transition (allowed: {:?})",
                    self.phase.valid_transitions()
                ),
            });
        }

        self.transitions.push(DebateTransition {
            from: self.phase,
            to,
            timestamp: Utc::now(),
            reason: reason.to_string(),
        });
        self.phase = to;

        if matches!(to, DebatePhase::ScientistTurn | DebatePhase::PhilosopherTurn) {
            self.current_round += 1;
        }

        Ok(())
    }

    /// Move to the turn phase of the speaker expected on the next round.
    pub fn begin_next_turn(&mut self) -> Result<Identity, TransitionError> {
        let speaker = Identity::expected_for_round(self.current_round + 1);
        let reason = format!("round {} opened", self.current_round + 1);
        self.transition(DebatePhase::turn_of(speaker), &reason)?;
        Ok(speaker)
    }

    /// Whether the debate has ended.
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Whether more rounds are available.
    pub fn has_rounds_remaining(&self) -> bool {
        self.current_round < self.total_rounds
    }

    /// Short form of the session id for log lines.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    /// Compact status line.
    pub fn status_line(&self) -> String {
        format!(
            "[{}] round {}/{} | session={} | topic={}",
            self.phase,
            self.current_round,
            self.total_rounds,
            self.short_id(),
            self.topic
        )
    }
}
