//! High-level operations for a fortune run.
//!
//! This module provides the operations that orchestrate the core
//! functionality: generating a bounded fortune, publishing it, and
//! driving a full run from theme selection to recorded history.

pub mod generate;
pub mod publish;
pub mod run;

// Re-export commonly used functions
pub use generate::{generate_fortune, trim_to_budget, FortuneMessage, GenerationSettings};
pub use publish::{publish_fortune, PostTemplate};
pub use run::{run_fortune, RunOptions, RunOutcome, RunReport, RunState};
