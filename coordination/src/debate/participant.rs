//! Participants: the nodes that produce arguments.
//!
//! A participant receives a read-only [`TurnContext`] snapshot for the
//! current round and answers with an [`Utterance`]. It never holds on to
//! the shared state between calls.

use serde::{Deserialize, Serialize};

use super::state::{Identity, Turn, VisibleMemory};

/// Characters of an opposing argument quoted back by [`PersonaParticipant`].
const QUOTE_CHARS: usize = 60;

/// Read-only per-round view handed to a participant.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub topic: &'a str,
    pub round: u32,
    /// The opposing side's memory only.
    pub visible_memory: VisibleMemory<'a>,
    pub transcript: &'a [Turn],
}

/// What a participant hands back for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Identity the participant claims to speak as.
    pub speaker: Identity,
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: Identity, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// Capability shared by every argument-producing node.
pub trait Participant {
    /// Node name used in audit records (e.g. `AgentA`).
    fn name(&self) -> &str;

    /// Identity this participant plays.
    fn identity(&self) -> Identity;

    /// Produce the argument for `ctx.round`.
    fn produce(&self, ctx: &TurnContext<'_>) -> Utterance;
}

/// Deterministic persona that argues a stance on the topic and quotes the
/// other side's latest point.
#[derive(Debug, Clone)]
pub struct PersonaParticipant {
    name: String,
    identity: Identity,
}

impl PersonaParticipant {
    pub fn new(name: impl Into<String>, identity: Identity) -> Self {
        Self {
            name: name.into(),
            identity,
        }
    }

    /// Persona using the default agent name for `identity`.
    pub fn for_identity(identity: Identity) -> Self {
        Self::new(identity.agent_name(), identity)
    }

    fn stance(&self) -> &'static str {
        match self.identity {
            Identity::Scientist => {
                "progress must be regulated through clinical testing to limit harm"
            }
            Identity::Philosopher => {
                "autonomy and freedom demand we weigh ethics before control"
            }
        }
    }
}

impl Participant for PersonaParticipant {
    fn name(&self) -> &str {
        &self.name
    }

    fn identity(&self) -> Identity {
        self.identity
    }

    fn produce(&self, ctx: &TurnContext<'_>) -> Utterance {
        let mut text = format!(
            "As a {}, I argue that {}: {}",
            self.identity,
            ctx.topic,
            self.stance()
        );

        // Quote only what the other side said; the view never holds our own turns.
        if let Some(prior) = ctx.visible_memory.latest() {
            let quoted: String = prior.utterance.chars().take(QUOTE_CHARS).collect();
            text.push_str(&format!(", building on earlier points like '{}...'", quoted));
        }

        text.push_str(&format!(" (round {}).", ctx.round));
        Utterance::new(self.identity, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::state::DebateState;

    fn ctx<'a>(state: &'a DebateState, speaker: Identity, round: u32) -> TurnContext<'a> {
        TurnContext {
            topic: state.topic(),
            round,
            visible_memory: state.visible_memory(speaker),
            transcript: state.transcript(),
        }
    }

    #[test]
    fn test_persona_opening_has_no_quote() {
        let state = DebateState::new("AI regulation");
        let agent = PersonaParticipant::for_identity(Identity::Scientist);
        let out = agent.produce(&ctx(&state, Identity::Scientist, 1));

        assert_eq!(out.speaker, Identity::Scientist);
        assert!(out.text.starts_with("As a Scientist, I argue that AI regulation"));
        assert!(out.text.ends_with("(round 1)."));
        assert!(!out.text.contains("building on"));
    }

    #[test]
    fn test_persona_quotes_only_opponent() {
        let mut state = DebateState::new("AI regulation");
        state.record(Turn::new(1, Identity::Scientist, "scientist opening line"));
        state.record(Turn::new(2, Identity::Philosopher, "philosopher rebuttal line"));

        let agent = PersonaParticipant::for_identity(Identity::Scientist);
        let out = agent.produce(&ctx(&state, Identity::Scientist, 3));
        assert!(out.text.contains("'philosopher rebuttal line...'"));
        assert!(!out.text.contains("scientist opening line"));
    }

    #[test]
    fn test_persona_quote_truncated() {
        let mut state = DebateState::new("t");
        let long = "x".repeat(200);
        state.record(Turn::new(1, Identity::Scientist, long));

        let agent = PersonaParticipant::for_identity(Identity::Philosopher);
        let out = agent.produce(&ctx(&state, Identity::Philosopher, 2));
        assert!(out.text.contains(&format!("'{}...'", "x".repeat(QUOTE_CHARS))));
        assert!(!out.text.contains(&"x".repeat(QUOTE_CHARS + 1)));
    }

    #[test]
    fn test_persona_is_deterministic() {
        let state = DebateState::new("topic");
        let agent = PersonaParticipant::new("AgentB", Identity::Philosopher);
        let a = agent.produce(&ctx(&state, Identity::Philosopher, 2));
        let b = agent.produce(&ctx(&state, Identity::Philosopher, 2));
        assert_eq!(a, b);
        assert_eq!(agent.name(), "AgentB");
    }
}
