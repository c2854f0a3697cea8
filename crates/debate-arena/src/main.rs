use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use debate_arena::interrupt::InterruptibleInput;
use debate_arena::{telemetry, ArenaConfig, PathOverrides};
use tracing::debug;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Debate topic; skips the interactive prompt
    #[arg(long)]
    topic: Option<String>,

    /// TOML file with output paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Audit log path (overrides ARENA_LOG_PATH)
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Verdict JSON path (overrides ARENA_VERDICT_PATH)
    #[arg(long)]
    verdict_path: Option<PathBuf>,

    /// Graphviz diagram path (overrides ARENA_DIAGRAM_PATH)
    #[arg(long)]
    diagram_path: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Emit diagnostics as JSON lines
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    telemetry::init_tracing(args.json_logs, telemetry::level_for(args.verbose));

    let overrides = PathOverrides {
        log_path: args.log_path,
        verdict_path: args.verdict_path,
        diagram_path: args.diagram_path,
    };
    let config = ArenaConfig::resolve(args.config.as_deref(), &overrides)?;
    debug!(
        log = %config.log_path.display(),
        verdict = %config.verdict_path.display(),
        diagram = %config.diagram_path.display(),
        rounds = config.debate.total_rounds,
        "Arena configured"
    );

    let stdout = std::io::stdout();
    let status = match args.topic {
        Some(topic) => debate_arena::run(
            &config,
            Some(topic),
            &mut std::io::stdin().lock(),
            &mut stdout.lock(),
        )?,
        None => {
            // Ctrl-C at the prompt ends input the same way EOF does.
            let mut input = InterruptibleInput::stdin()?;
            debate_arena::run(&config, None, &mut input, &mut stdout.lock())?
        }
    };

    Ok(ExitCode::from(status.exit_code()))
}
