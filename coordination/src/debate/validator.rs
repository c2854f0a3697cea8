//! Turn validation: speaking order, duplicate detection, and coherence.
//!
//! Every violation is terminal for the debate. The validator only
//! reports; it never retries or repairs a turn.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::state::{Identity, Turn};

static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("NON_WORD_RUN regex should compile"));

/// Canonical form used for duplicate detection: lowercase, every run of
/// non-word characters collapsed to one space, trimmed.
pub fn normalize(text: &str) -> String {
    NON_WORD_RUN
        .replace_all(&text.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Exact post-normalization match against every prior utterance.
pub fn is_duplicate(utterance: &str, transcript: &[Turn]) -> bool {
    let candidate = normalize(utterance);
    transcript
        .iter()
        .any(|turn| normalize(&turn.utterance) == candidate)
}

/// Kind of protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Speaker did not match strict alternation.
    OutOfTurn,
    /// Utterance repeats an earlier one after normalization.
    Duplicate,
    /// Utterance too short to count as an argument.
    Incoherent,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfTurn => write!(f, "out_of_turn"),
            Self::Duplicate => write!(f, "duplicate"),
            Self::Incoherent => write!(f, "incoherent"),
        }
    }
}

/// A violation detected on a specific round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolViolation {
    pub round: u32,
    pub kind: ViolationKind,
    /// Identity the offending participant claimed.
    pub claimed: Identity,
    /// Identity the protocol expected.
    pub expected: Identity,
}

impl ProtocolViolation {
    /// Audit-log form of the violation.
    pub fn audit_message(&self) -> String {
        match self.kind {
            ViolationKind::OutOfTurn => format!(
                "Agent spoke out of turn: got {}, expected {}",
                self.claimed, self.expected
            ),
            ViolationKind::Duplicate => format!(
                "Duplicate argument detected on round {} by {}",
                self.round, self.claimed
            ),
            ViolationKind::Incoherent => format!(
                "Incoherent/empty argument on round {} by {}",
                self.round, self.claimed
            ),
        }
    }
}

impl std::fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ViolationKind::OutOfTurn => write!(
                f,
                "Protocol error: {} spoke on round {} (expected {}). Aborting.",
                self.claimed, self.round, self.expected
            ),
            ViolationKind::Duplicate => write!(
                f,
                "Protocol error: duplicate argument on round {}. Aborting.",
                self.round
            ),
            ViolationKind::Incoherent => write!(
                f,
                "Protocol error: incoherent argument on round {}. Aborting.",
                self.round
            ),
        }
    }
}

impl std::error::Error for ProtocolViolation {}

/// Configuration for turn validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Minimum trimmed length (in characters) of a coherent utterance.
    pub min_coherent_chars: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_coherent_chars: 10,
        }
    }
}

/// Validates a single turn against the debate protocol.
#[derive(Debug, Clone, Default)]
pub struct TurnValidator {
    config: ValidatorConfig,
}

impl TurnValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Check a candidate turn. First failure wins:
    /// out-of-turn, then duplicate, then incoherence.
    pub fn validate(
        &self,
        claimed: Identity,
        utterance: &str,
        round: u32,
        transcript: &[Turn],
    ) -> Result<(), ProtocolViolation> {
        let expected = Identity::expected_for_round(round);
        let violation = |kind| ProtocolViolation {
            round,
            kind,
            claimed,
            expected,
        };

        // 1. Speaking order
        if claimed != expected {
            return Err(violation(ViolationKind::OutOfTurn));
        }

        // 2. Duplicate
        if is_duplicate(utterance, transcript) {
            return Err(violation(ViolationKind::Duplicate));
        }

        // 3. Coherence
        if utterance.trim().chars().count() < self.config.min_coherent_chars {
            return Err(violation(ViolationKind::Incoherent));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript() -> Vec<Turn> {
        vec![
            Turn::new(1, Identity::Scientist, "Clinical testing limits harm."),
            Turn::new(2, Identity::Philosopher, "Freedom matters more than control."),
        ]
    }

    #[test]
    fn test_normalize_rules() {
        assert_eq!(normalize("  Hello,   World!!  "), "hello world");
        assert_eq!(normalize("risk--safety...harm"), "risk safety harm");
        assert_eq!(normalize("snake_case stays"), "snake_case stays");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in [
            "As a Scientist, I argue (round 1).",
            "  MIXED case -- punctuation!! ",
            "ünïcode — dashes",
            "",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_duplicate_ignores_case_and_punctuation() {
        let t = transcript();
        assert!(is_duplicate("clinical TESTING limits harm", &t));
        assert!(is_duplicate("Clinical, testing -- limits harm!!", &t));
        assert!(!is_duplicate("Clinical testing limits harm today", &t));
    }

    #[test]
    fn test_duplicate_is_not_substring_match() {
        let t = transcript();
        assert!(!is_duplicate("Clinical testing", &t));
    }

    #[test]
    fn test_valid_turn() {
        let v = TurnValidator::default();
        assert!(v
            .validate(Identity::Scientist, "A brand new argument.", 3, &transcript())
            .is_ok());
    }

    #[test]
    fn test_out_of_turn() {
        let v = TurnValidator::default();
        let err = v
            .validate(Identity::Philosopher, "A brand new argument.", 3, &transcript())
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::OutOfTurn);
        assert_eq!(err.round, 3);
        assert_eq!(err.expected, Identity::Scientist);
    }

    #[test]
    fn test_out_of_turn_wins_over_duplicate() {
        let v = TurnValidator::default();
        let err = v
            .validate(
                Identity::Philosopher,
                "Clinical testing limits harm.",
                3,
                &transcript(),
            )
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::OutOfTurn);
    }

    #[test]
    fn test_duplicate_wins_over_incoherent() {
        let v = TurnValidator::default();
        let t = vec![Turn::new(1, Identity::Scientist, "short")];
        let err = v
            .validate(Identity::Philosopher, "SHORT!", 2, &t)
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::Duplicate);
    }

    #[test]
    fn test_incoherent_uses_trimmed_length() {
        let v = TurnValidator::default();
        let err = v
            .validate(Identity::Scientist, "   hello    ", 1, &[])
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::Incoherent);

        assert!(v.validate(Identity::Scientist, "  ten chars! ", 1, &[]).is_ok());
    }

    #[test]
    fn test_violation_display_names_round_and_kind() {
        let v = ProtocolViolation {
            round: 3,
            kind: ViolationKind::OutOfTurn,
            claimed: Identity::Philosopher,
            expected: Identity::Scientist,
        };
        assert_eq!(
            v.to_string(),
            "Protocol error: Philosopher spoke on round 3 (expected Scientist). Aborting."
        );
        assert!(v.audit_message().contains("got Philosopher, expected Scientist"));

        let v = ProtocolViolation {
            kind: ViolationKind::Duplicate,
            round: 5,
            claimed: Identity::Scientist,
            expected: Identity::Scientist,
        };
        assert!(v.to_string().contains("duplicate argument on round 5"));
    }

    #[test]
    fn test_violation_kind_display() {
        assert_eq!(ViolationKind::OutOfTurn.to_string(), "out_of_turn");
        assert_eq!(ViolationKind::Duplicate.to_string(), "duplicate");
        assert_eq!(ViolationKind::Incoherent.to_string(), "incoherent");
    }
}
