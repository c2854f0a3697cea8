//! One CLI run: topic → diagram → debate → verdict.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use arena_coordination::audit::{AuditEvent, AuditLog, AuditSink};
use arena_coordination::debate::{
    write_verdict, DebateGraph, DebateOrchestrator, DebateOutcome, Identity, PersonaParticipant,
};
use tracing::{info, warn};

use crate::config::ArenaConfig;
use crate::prompt::{read_topic, TopicInput};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// All rounds passed and the verdict was written.
    Completed,
    /// A turn broke the protocol; no verdict.
    ProtocolViolation,
    /// Topic entry was cancelled before anything ran.
    Aborted,
}

impl RunStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Completed | Self::Aborted => 0,
            Self::ProtocolViolation => 1,
        }
    }
}

/// Run one debate with the bundled personas.
///
/// When `topic` is `None` the topic is read from `input` after a prompt on
/// `output`. The transcript, verdict and file locations go to `output`.
pub fn run(
    config: &ArenaConfig,
    topic: Option<String>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<RunStatus> {
    let mut log = AuditLog::init(&config.log_path).context(format!(
        "Failed to initialize audit log {}",
        config.log_path.display()
    ))?;

    let topic = match topic {
        Some(topic) => topic.trim().to_string(),
        None => match read_topic(input, output).context("Failed to read topic")? {
            TopicInput::Topic(topic) => topic,
            TopicInput::Aborted => {
                info!("Topic entry aborted");
                log.record(AuditEvent::UserAbort)?;
                log.close();
                return Ok(RunStatus::Aborted);
            }
        },
    };
    log.record(AuditEvent::TopicInput {
        topic: topic.clone(),
    })?;

    let graph = DebateGraph::standard();
    graph.write_to(&config.diagram_path).context(format!(
        "Failed to write diagram {}",
        config.diagram_path.display()
    ))?;
    log.record(AuditEvent::DiagramWritten {
        path: config.diagram_path.display().to_string(),
    })?;
    for node in graph.nodes() {
        log.record(AuditEvent::NodeInitialized {
            node: node.name().to_string(),
        })?;
    }

    writeln!(output, "Starting debate between Scientist and Philosopher...\n")?;

    let scientist = PersonaParticipant::for_identity(Identity::Scientist);
    let philosopher = PersonaParticipant::for_identity(Identity::Philosopher);
    let orchestrator = DebateOrchestrator::with_config(config.debate.clone());
    let outcome = orchestrator
        .run(&topic, [&scientist, &philosopher], &mut log)
        .context("Debate run failed")?;

    print_transcript(&outcome, output)?;
    info!(summary = %outcome.summary_line(), "Debate finished");

    if let Some(violation) = &outcome.violation {
        warn!(round = violation.round, kind = %violation.kind, "Debate aborted");
        writeln!(output, "{}", violation)?;
        log.close();
        return Ok(RunStatus::ProtocolViolation);
    }

    let Some(verdict) = &outcome.verdict else {
        anyhow::bail!("Debate ended in {} without a verdict", outcome.terminal_phase);
    };

    writeln!(output, "\n[Judge] Summary of debate:")?;
    writeln!(output, "{}", verdict.summary)?;
    writeln!(output, "\n[Judge] Winner: {}", verdict.winner)?;
    writeln!(output, "Reason: {}\n", verdict.reason)?;

    write_verdict(&config.verdict_path, verdict).context(format!(
        "Failed to write verdict {}",
        config.verdict_path.display()
    ))?;
    log.record(AuditEvent::VerdictWritten {
        path: config.verdict_path.display().to_string(),
    })?;
    log.close();

    writeln!(
        output,
        "Debate complete. Logs written to {} and {}. DAG saved to {}",
        config.log_path.display(),
        config.verdict_path.display(),
        config.diagram_path.display()
    )?;

    Ok(RunStatus::Completed)
}

fn print_transcript(outcome: &DebateOutcome, output: &mut impl Write) -> std::io::Result<()> {
    for turn in &outcome.transcript {
        writeln!(output, "[Round {}] {}: {}", turn.round, turn.speaker, turn.utterance)?;
    }
    Ok(())
}
