//! Debate orchestrator: drives the alternating turn loop.
//!
//! Ties together participants, the turn validator, the audit sink and
//! the judge to run a complete debate end-to-end. The orchestrator is the
//! only writer of transcript and memory; participants and the judge get
//! read-only views.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::audit::{AuditEvent, AuditSink};
use crate::error::ArenaResult;

use super::graph::NodeKind;
use super::judge::{Judge, JudgeConfig, Verdict};
use super::participant::{Participant, TurnContext};
use super::state::{DebateMemory, DebatePhase, DebateSession, DebateState, Turn};
use super::validator::{ProtocolViolation, TurnValidator, ValidatorConfig};

/// Configuration for the debate orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Number of turns; one speaker per round.
    pub total_rounds: u32,
    /// Characters of an accepted argument echoed in the memory-update record.
    pub memory_snippet_chars: usize,
    pub validator: ValidatorConfig,
    pub judge: JudgeConfig,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            total_rounds: 8,
            memory_snippet_chars: 120,
            validator: ValidatorConfig::default(),
            judge: JudgeConfig::default(),
        }
    }
}

/// Outcome of a debate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateOutcome {
    /// `Concluded` or `Aborted`.
    pub terminal_phase: DebatePhase,
    /// Accepted turns, in order.
    pub transcript: Vec<Turn>,
    pub memory: DebateMemory,
    /// Present only when every round passed validation.
    pub verdict: Option<Verdict>,
    /// The violation that halted the debate, if any.
    pub violation: Option<ProtocolViolation>,
    /// Session snapshot at completion.
    pub session: DebateSession,
}

impl DebateOutcome {
    /// Whether the debate ran to a verdict.
    pub fn is_success(&self) -> bool {
        self.terminal_phase == DebatePhase::Concluded
    }

    /// Rounds that were accepted into the transcript.
    pub fn rounds_completed(&self) -> usize {
        self.transcript.len()
    }

    /// Compact summary line.
    pub fn summary_line(&self) -> String {
        match (&self.verdict, &self.violation) {
            (Some(verdict), _) => format!(
                "[CONCLUDED] {} rounds | winner={} | session={}",
                self.rounds_completed(),
                verdict.winner,
                self.session.short_id()
            ),
            (None, Some(violation)) => format!(
                "[ABORTED] {} rounds | {} at round {} | session={}",
                self.rounds_completed(),
                violation.kind,
                violation.round,
                self.session.short_id()
            ),
            (None, None) => format!(
                "[{}] {} rounds | session={}",
                self.terminal_phase,
                self.rounds_completed(),
                self.session.short_id()
            ),
        }
    }
}

/// Drives a two-participant debate to a verdict or a protocol abort.
///
/// Usage:
/// 1. Create with `new()` or `with_config()`
/// 2. Call `run()` with the topic, the ordered participant pair and a sink
/// 3. Inspect the returned [`DebateOutcome`]
#[derive(Debug, Clone, Default)]
pub struct DebateOrchestrator {
    config: DebateConfig,
    validator: TurnValidator,
    judge: Judge,
}

impl DebateOrchestrator {
    /// Create an orchestrator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DebateConfig::default())
    }

    pub fn with_config(config: DebateConfig) -> Self {
        let validator = TurnValidator::new(config.validator.clone());
        let judge = Judge::new(config.judge.clone());
        Self {
            config,
            validator,
            judge,
        }
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Run the whole debate.
    ///
    /// `participants[0]` is called on odd rounds, `participants[1]` on even
    /// rounds. The first violation aborts the run: later rounds are skipped
    /// and no verdict is produced. Only audit-sink failures surface as `Err`.
    pub fn run(
        &self,
        topic: &str,
        participants: [&dyn Participant; 2],
        sink: &mut dyn AuditSink,
    ) -> ArenaResult<DebateOutcome> {
        let mut session = DebateSession::new(topic, self.config.total_rounds);
        let mut state = DebateState::new(topic);

        sink.record(AuditEvent::TopicReceived {
            node: NodeKind::UserInput.name().to_string(),
            topic: topic.to_string(),
        })?;
        sink.record(AuditEvent::DebateStarted {
            session_id: session.short_id().to_string(),
            total_rounds: self.config.total_rounds,
        })?;
        info!(
            session_id = %session.id,
            topic,
            rounds = self.config.total_rounds,
            "Debate started"
        );

        while session.has_rounds_remaining() {
            let expected = session.begin_next_turn()?;
            let round = session.current_round;

            let participant = participants[if round % 2 == 1 { 0 } else { 1 }];
            let ctx = TurnContext {
                topic,
                round,
                visible_memory: state.visible_memory(expected),
                transcript: state.transcript(),
            };
            let utterance = participant.produce(&ctx);
            sink.record(AuditEvent::ArgumentProduced {
                node: participant.name().to_string(),
                argument: utterance.text.clone(),
            })?;

            if let Err(violation) = self.validator.validate(
                utterance.speaker,
                &utterance.text,
                round,
                state.transcript(),
            ) {
                warn!(
                    round,
                    kind = %violation.kind,
                    claimed = %violation.claimed,
                    plays = %participant.identity(),
                    node = participant.name(),
                    "Protocol violation"
                );
                sink.record(AuditEvent::ProtocolError {
                    message: violation.audit_message(),
                })?;
                session.transition(DebatePhase::Aborted, &violation.to_string())?;

                let (transcript, memory) = state.into_parts();
                return Ok(DebateOutcome {
                    terminal_phase: session.phase,
                    transcript,
                    memory,
                    verdict: None,
                    violation: Some(violation),
                    session,
                });
            }

            let turn = Turn::new(round, utterance.speaker, utterance.text);
            sink.record(AuditEvent::TurnRecorded {
                round,
                speaker: turn.speaker,
                argument: turn.utterance.clone(),
            })?;
            let snippet: String = turn
                .utterance
                .chars()
                .take(self.config.memory_snippet_chars)
                .collect();
            let speaker = turn.speaker;
            state.record(turn);
            sink.record(AuditEvent::MemoryUpdate {
                round,
                speaker,
                snippet,
            })?;
            debug!(round, speaker = %speaker, "Turn recorded");
        }

        session.transition(DebatePhase::Judging, "all rounds complete")?;
        let verdict = self.judge_state(&state, sink)?;
        session.transition(DebatePhase::Concluded, &format!("winner {}", verdict.winner))?;
        info!(winner = %verdict.winner, reason = %verdict.reason, "Debate concluded");

        let (transcript, memory) = state.into_parts();
        Ok(DebateOutcome {
            terminal_phase: session.phase,
            transcript,
            memory,
            verdict: Some(verdict),
            violation: None,
            session,
        })
    }

    fn judge_state(&self, state: &DebateState, sink: &mut dyn AuditSink) -> ArenaResult<Verdict> {
        sink.record(AuditEvent::MemorySnapshot {
            memory: serde_json::to_string(state.memory())?,
        })?;
        sink.record(AuditEvent::JudgeReceived {
            entries: state.transcript().len(),
        })?;

        let verdict = self.judge.run(state.transcript(), state.memory());

        sink.record(AuditEvent::Judgment {
            winner: verdict.winner.to_string(),
            reason: verdict.reason.clone(),
        })?;
        // One record per line keeps every log line timestamped.
        for line in verdict.summary.lines() {
            sink.record(AuditEvent::JudgeSummary {
                summary: line.to_string(),
            })?;
        }
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemorySink;
    use crate::debate::participant::{PersonaParticipant, Utterance};
    use crate::debate::state::Identity;
    use crate::debate::validator::ViolationKind;

    /// Replays fixed lines, optionally claiming a different identity.
    struct Scripted {
        identity: Identity,
        lines: Vec<(u32, Identity, &'static str)>,
    }

    impl Participant for Scripted {
        fn name(&self) -> &str {
            self.identity.agent_name()
        }

        fn identity(&self) -> Identity {
            self.identity
        }

        fn produce(&self, ctx: &TurnContext<'_>) -> Utterance {
            let (_, claimed, text) = self
                .lines
                .iter()
                .find(|(round, _, _)| *round == ctx.round)
                .copied()
                .unwrap_or((ctx.round, self.identity, "fallback argument text"));
            Utterance::new(claimed, text)
        }
    }

    fn personas() -> (PersonaParticipant, PersonaParticipant) {
        (
            PersonaParticipant::for_identity(Identity::Scientist),
            PersonaParticipant::for_identity(Identity::Philosopher),
        )
    }

    #[test]
    fn test_full_debate_with_personas() {
        let (a, b) = personas();
        let mut sink = MemorySink::new();
        let outcome = DebateOrchestrator::new()
            .run("AI regulation", [&a, &b], &mut sink)
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.rounds_completed(), 8);
        assert_eq!(outcome.terminal_phase, DebatePhase::Concluded);
        assert!(outcome.verdict.is_some());
        assert!(outcome.violation.is_none());
        assert!(outcome.summary_line().starts_with("[CONCLUDED] 8 rounds"));
    }

    #[test]
    fn test_zero_rounds_goes_straight_to_judge() {
        let (a, b) = personas();
        let mut sink = MemorySink::new();
        let config = DebateConfig {
            total_rounds: 0,
            ..Default::default()
        };
        let outcome = DebateOrchestrator::with_config(config)
            .run("t", [&a, &b], &mut sink)
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.rounds_completed(), 0);
        assert_eq!(
            outcome.verdict.unwrap().winner,
            crate::debate::judge::Winner::Tie
        );
    }

    #[test]
    fn test_out_of_turn_aborts() {
        let a = Scripted {
            identity: Identity::Scientist,
            lines: vec![],
        };
        let b = Scripted {
            identity: Identity::Philosopher,
            lines: vec![(2, Identity::Scientist, "I am speaking as the wrong side")],
        };
        let mut sink = MemorySink::new();
        let outcome = DebateOrchestrator::new()
            .run("t", [&a, &b], &mut sink)
            .unwrap();

        assert!(!outcome.is_success());
        let violation = outcome.violation.unwrap();
        assert_eq!(violation.kind, ViolationKind::OutOfTurn);
        assert_eq!(violation.round, 2);
        assert_eq!(outcome.transcript.len(), 1);
        assert!(outcome.verdict.is_none());
        assert_eq!(outcome.session.phase, DebatePhase::Aborted);
    }

    #[test]
    fn test_abort_skips_judge_records() {
        let a = Scripted {
            identity: Identity::Scientist,
            lines: vec![(1, Identity::Scientist, "tiny")],
        };
        let (_, b) = personas();
        let mut sink = MemorySink::new();
        let outcome = DebateOrchestrator::new()
            .run("t", [&a, &b], &mut sink)
            .unwrap();

        assert_eq!(outcome.violation.unwrap().kind, ViolationKind::Incoherent);
        assert!(sink
            .events()
            .iter()
            .all(|e| !matches!(e, AuditEvent::JudgeReceived { .. })));
        assert!(matches!(
            sink.events().last(),
            Some(AuditEvent::ProtocolError { .. })
        ));
    }

    #[test]
    fn test_audit_order_per_round() {
        let (a, b) = personas();
        let mut sink = MemorySink::new();
        DebateOrchestrator::with_config(DebateConfig {
            total_rounds: 2,
            ..Default::default()
        })
        .run("AI regulation", [&a, &b], &mut sink)
        .unwrap();

        let messages = sink.messages();
        assert_eq!(messages[0], "Node[UserInputNode] received topic: AI regulation");
        assert!(messages[1].starts_with("Debate started"));
        assert!(messages[2].starts_with("Node[AgentA] produced argument"));
        assert!(messages[3].starts_with("[Round 1] Scientist: "));
        assert!(messages[4].starts_with("[Round 1] Memory update for Scientist: "));
        assert!(messages[5].starts_with("Node[AgentB] produced argument"));
        assert!(messages[6].starts_with("[Round 2] Philosopher: "));
        assert!(messages[7].starts_with("[Round 2] Memory update for Philosopher: "));
        assert!(messages[8].starts_with("Node[MemoryNode] snapshot: "));
        assert_eq!(messages[9], "Node[JudgeNode] received transcript of 2 entries");
        assert!(messages[10].starts_with("Node[JudgeNode] judgment: Winner="));
        assert!(messages[11].starts_with("Node[JudgeNode] summary: [1] Scientist: "));
        assert!(messages[12].starts_with("Node[JudgeNode] summary: [2] Philosopher: "));
        assert_eq!(messages.len(), 13);
        assert!(messages.iter().all(|m| !m.contains('\n')));
    }

    #[test]
    fn test_memory_update_snippet_truncated() {
        let long: &'static str = Box::leak("z".repeat(300).into_boxed_str());
        let a = Scripted {
            identity: Identity::Scientist,
            lines: vec![(1, Identity::Scientist, long)],
        };
        let (_, b) = personas();
        let mut sink = MemorySink::new();
        DebateOrchestrator::with_config(DebateConfig {
            total_rounds: 1,
            ..Default::default()
        })
        .run("t", [&a, &b], &mut sink)
        .unwrap();

        let update = sink
            .events()
            .iter()
            .find_map(|e| match e {
                AuditEvent::MemoryUpdate { snippet, .. } => Some(snippet.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(update.len(), 120);
    }

    #[test]
    fn test_debate_config_default() {
        let config = DebateConfig::default();
        assert_eq!(config.total_rounds, 8);
        assert_eq!(config.validator.min_coherent_chars, 10);
        assert_eq!(config.judge.summary_window, 8);
    }
}
