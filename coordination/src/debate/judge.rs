//! Judge: transcript summary, keyword scoring, and the final verdict.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::state::{DebateMemory, Identity, Turn};

/// Summary text used when nothing was said.
pub const EMPTY_SUMMARY: &str = "No arguments were presented.";

/// Final decision of the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Scientist,
    Philosopher,
    Tie,
}

impl From<Identity> for Winner {
    fn from(identity: Identity) -> Self {
        match identity {
            Identity::Scientist => Self::Scientist,
            Identity::Philosopher => Self::Philosopher,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scientist => write!(f, "Scientist"),
            Self::Philosopher => write!(f, "Philosopher"),
            Self::Tie => write!(f, "Tie"),
        }
    }
}

/// The scored outcome of a completed debate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub summary: String,
    pub winner: Winner,
    pub reason: String,
    pub scores: BTreeMap<Identity, f64>,
}

impl Verdict {
    /// Score for one side (0.0 if absent).
    pub fn score(&self, identity: Identity) -> f64 {
        self.scores.get(&identity).copied().unwrap_or(0.0)
    }
}

/// Keyword lists and weights used for scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRubric {
    pub scientist_keywords: Vec<String>,
    pub philosopher_keywords: Vec<String>,
    /// Points for every accepted turn.
    pub turn_points: f64,
    /// Points per distinct utterance of a side.
    pub distinct_bonus: f64,
}

impl Default for ScoringRubric {
    fn default() -> Self {
        let words = |list: &[&str]| -> Vec<String> { list.iter().map(|w| w.to_string()).collect() };
        Self {
            scientist_keywords: words(&[
                "risk",
                "safety",
                "regulated",
                "harm",
                "medical",
                "clinical",
                "testing",
            ]),
            philosopher_keywords: words(&[
                "autonomy",
                "freedom",
                "ethics",
                "progress",
                "philosophy",
                "meaning",
            ]),
            turn_points: 1.0,
            distinct_bonus: 0.5,
        }
    }
}

impl ScoringRubric {
    pub fn keywords_for(&self, identity: Identity) -> &[String] {
        match identity {
            Identity::Scientist => &self.scientist_keywords,
            Identity::Philosopher => &self.philosopher_keywords,
        }
    }

    /// Non-overlapping, case-insensitive keyword hits for `identity` in `text`.
    pub fn keyword_hits(&self, identity: Identity, text: &str) -> usize {
        let lower = text.to_lowercase();
        self.keywords_for(identity)
            .iter()
            .map(|kw| lower.matches(kw.to_lowercase().as_str()).count())
            .sum()
    }

    /// Score both sides: turn points and keyword hits from the transcript,
    /// the distinct-utterance bonus from each side's memory.
    pub fn score(&self, transcript: &[Turn], memory: &DebateMemory) -> BTreeMap<Identity, f64> {
        let mut scores: BTreeMap<Identity, f64> =
            Identity::ALL.iter().map(|id| (*id, 0.0)).collect();

        for turn in transcript {
            let hits = self.keyword_hits(turn.speaker, &turn.utterance);
            *scores.entry(turn.speaker).or_default() += self.turn_points + hits as f64;
        }

        for identity in Identity::ALL {
            let distinct: HashSet<&str> = memory
                .turns_for(identity)
                .iter()
                .map(|t| t.utterance.as_str())
                .collect();
            *scores.entry(identity).or_default() += self.distinct_bonus * distinct.len() as f64;
        }

        scores
    }
}

/// Configuration for the judge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// How many trailing turns appear in the summary.
    pub summary_window: usize,
    /// Characters of each utterance kept in the summary.
    pub summary_chars: usize,
    pub rubric: ScoringRubric,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            summary_window: 8,
            summary_chars: 160,
            rubric: ScoringRubric::default(),
        }
    }
}

/// Scores a finished transcript. Never mutates what it is given.
#[derive(Debug, Clone, Default)]
pub struct Judge {
    config: JudgeConfig,
}

impl Judge {
    pub fn new(config: JudgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Produce the verdict for a finished debate.
    pub fn run(&self, transcript: &[Turn], memory: &DebateMemory) -> Verdict {
        let summary = self.summarize(transcript);
        let scores = self.config.rubric.score(transcript, memory);
        let (winner, reason) = decide(&scores);

        Verdict {
            summary,
            winner,
            reason,
            scores,
        }
    }

    /// Ordinal lines for the trailing window of the transcript.
    pub fn summarize(&self, transcript: &[Turn]) -> String {
        if transcript.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        let start = transcript.len().saturating_sub(self.config.summary_window);
        transcript[start..]
            .iter()
            .enumerate()
            .map(|(i, turn)| {
                let text: String = turn
                    .utterance
                    .chars()
                    .take(self.config.summary_chars)
                    .collect();
                format!("[{}] {}: {}", i + 1, turn.speaker, text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Winner and justification from final scores. Strictly higher wins.
pub fn decide(scores: &BTreeMap<Identity, f64>) -> (Winner, String) {
    let scientist = scores.get(&Identity::Scientist).copied().unwrap_or(0.0);
    let philosopher = scores.get(&Identity::Philosopher).copied().unwrap_or(0.0);

    if scientist > philosopher {
        (
            Winner::Scientist,
            format!(
                "Scientist scored {:.1} vs Philosopher {:.1}: stronger risk/safety grounding.",
                scientist, philosopher
            ),
        )
    } else if philosopher > scientist {
        (
            Winner::Philosopher,
            format!(
                "Philosopher scored {:.1} vs Scientist {:.1}: stronger autonomy/ethics framing.",
                philosopher, scientist
            ),
        )
    } else {
        (
            Winner::Tie,
            format!(
                "Scores equal (Scientist {:.1}, Philosopher {:.1}). Logical strengths balanced.",
                scientist, philosopher
            ),
        )
    }
}
