//! Verdict persistence: the JSON record written after a completed debate.
//!
//! Key names are stable: `summary`, `winner`, `reason`, `scores`.

use std::path::Path;

use crate::error::{ArenaError, ArenaResult};

use super::judge::Verdict;

impl Verdict {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ArenaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> ArenaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write `verdict` to `path`, replacing any previous file.
pub fn write_verdict(path: impl AsRef<Path>, verdict: &Verdict) -> ArenaResult<()> {
    let path = path.as_ref();
    let json = verdict.to_json()?;
    std::fs::write(path, json + "\n")
        .map_err(|e| ArenaError::artifact_write("verdict", path, e.to_string()))
}

/// Load a verdict previously written by [`write_verdict`].
pub fn read_verdict(path: impl AsRef<Path>) -> ArenaResult<Verdict> {
    let json = std::fs::read_to_string(path)?;
    Verdict::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::judge::{Judge, Winner};
    use crate::debate::state::{DebateMemory, Identity, Turn};
    use tempfile::tempdir;

    fn sample_verdict() -> Verdict {
        let transcript = vec![
            Turn::new(1, Identity::Scientist, "Clinical testing limits harm."),
            Turn::new(2, Identity::Philosopher, "Freedom and autonomy come first."),
        ];
        Judge::default().run(&transcript, &DebateMemory::from_transcript(&transcript))
    }

    #[test]
    fn test_write_and_read_verdict() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("final_verdict.json");
        let verdict = sample_verdict();

        write_verdict(&path, &verdict).unwrap();
        let restored = read_verdict(&path).unwrap();
        assert_eq!(restored, verdict);
    }

    #[test]
    fn test_verdict_file_has_stable_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("final_verdict.json");
        write_verdict(&path, &sample_verdict()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<&str> = raw
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 4);
        for key in ["summary", "winner", "reason", "scores"] {
            assert!(keys.contains(&key), "missing key {}", key);
        }
        assert!(raw["scores"]["Scientist"].is_number());
        assert!(raw["scores"]["Philosopher"].is_number());
    }

    #[test]
    fn test_bad_json() {
        let err = Verdict::from_json("not json").unwrap_err();
        assert!(matches!(err, ArenaError::Json(_)));
    }

    #[test]
    fn test_winner_parses_from_string() {
        let json = r#"{"summary":"s","winner":"Tie","reason":"r","scores":{"Scientist":1.0,"Philosopher":1.0}}"#;
        let verdict = Verdict::from_json(json).unwrap();
        assert_eq!(verdict.winner, Winner::Tie);
        assert_eq!(verdict.score(Identity::Philosopher), 1.0);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("verdict.json");
        let err = write_verdict(&path, &sample_verdict()).unwrap_err();
        assert!(matches!(err, ArenaError::ArtifactWrite { .. }));
    }
}
