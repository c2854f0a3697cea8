//! Static node graph of a debate, emitted as Graphviz DOT.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{ArenaError, ArenaResult};

use super::state::Identity;

/// The fixed set of nodes a debate is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Accepts the topic.
    UserInput,
    /// Argues as one identity.
    Participant(Identity),
    /// Holds per-identity history.
    Memory,
    /// Scores the transcript.
    Judge,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::UserInput => "UserInputNode",
            Self::Participant(identity) => identity.agent_name(),
            Self::Memory => "MemoryNode",
            Self::Judge => "JudgeNode",
        }
    }

    fn shape(self) -> &'static str {
        match self {
            Self::UserInput => "box",
            Self::Participant(_) => "ellipse",
            Self::Memory => "note",
            Self::Judge => "diamond",
        }
    }

    fn attributes(self) -> String {
        match self {
            Self::Participant(identity) => format!(
                "[shape={},label=\"{}\\n({})\"]",
                self.shape(),
                self.name(),
                identity
            ),
            _ => format!("[shape={}]", self.shape()),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Directed graph with the debate's fixed topology:
/// input → participants → memory → (participants, judge).
#[derive(Debug, Clone)]
pub struct DebateGraph {
    nodes: Vec<NodeKind>,
    edges: Vec<(NodeKind, NodeKind)>,
}

impl Default for DebateGraph {
    fn default() -> Self {
        Self::standard()
    }
}

impl DebateGraph {
    pub fn standard() -> Self {
        let input = NodeKind::UserInput;
        let a = NodeKind::Participant(Identity::Scientist);
        let b = NodeKind::Participant(Identity::Philosopher);
        let memory = NodeKind::Memory;
        let judge = NodeKind::Judge;

        Self {
            nodes: vec![input, a, b, memory, judge],
            edges: vec![
                (input, a),
                (input, b),
                (a, memory),
                (b, memory),
                (memory, a),
                (memory, b),
                (a, judge),
                (b, judge),
                (memory, judge),
            ],
        }
    }

    pub fn nodes(&self) -> &[NodeKind] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(NodeKind, NodeKind)] {
        &self.edges
    }

    /// Render as a DOT digraph.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph DebateDAG {\n  rankdir=LR;\n");
        for node in &self.nodes {
            let _ = writeln!(dot, "  {} {};", node.name(), node.attributes());
        }
        for (from, to) in &self.edges {
            let _ = writeln!(dot, "  {} -> {};", from.name(), to.name());
        }
        dot.push_str("}\n");
        dot
    }

    /// Write the DOT rendering to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> ArenaResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_dot())
            .map_err(|e| ArenaError::artifact_write("diagram", path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_node_names() {
        assert_eq!(NodeKind::UserInput.name(), "UserInputNode");
        assert_eq!(NodeKind::Participant(Identity::Scientist).name(), "AgentA");
        assert_eq!(NodeKind::Participant(Identity::Philosopher).name(), "AgentB");
        assert_eq!(NodeKind::Judge.to_string(), "JudgeNode");
    }

    #[test]
    fn test_standard_topology() {
        let graph = DebateGraph::standard();
        assert_eq!(graph.nodes().len(), 5);
        assert_eq!(graph.edges().len(), 9);
        let memory_out: Vec<_> = graph
            .edges()
            .iter()
            .filter(|(from, _)| *from == NodeKind::Memory)
            .collect();
        assert_eq!(memory_out.len(), 3);
    }

    #[test]
    fn test_dot_rendering() {
        let dot = DebateGraph::standard().to_dot();
        assert!(dot.starts_with("digraph DebateDAG {"));
        assert!(dot.contains("  AgentA [shape=ellipse,label=\"AgentA\\n(Scientist)\"];"));
        assert!(dot.contains("  JudgeNode [shape=diamond];"));
        assert!(dot.contains("  UserInputNode -> AgentA;"));
        assert!(dot.contains("  MemoryNode -> AgentB;"));
        assert!(dot.contains("  MemoryNode -> JudgeNode;"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dag.dot");
        DebateGraph::standard().write_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DebateGraph::standard().to_dot());
    }
}
