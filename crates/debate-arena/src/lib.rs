//! Debate Arena CLI
//!
//! Runs a Scientist vs Philosopher debate on a topic read from the
//! terminal and writes three artifacts: the audit log, a Graphviz diagram
//! of the node graph and, when every round passes validation, the verdict
//! JSON.

pub mod app;
pub mod config;
pub mod interrupt;
pub mod prompt;
pub mod telemetry;

pub use app::{run, RunStatus};
pub use config::{ArenaConfig, PathOverrides};
