//! One complete fortune run.
//!
//! # Flow
//!
//! 1. Take the history lock, load history and pick a theme (`ThemeSelected`)
//! 2. Generate and bound the fortune text (`ContentGenerated`)
//! 3. Publish it and record the theme (`Published`)
//!
//! A publishing run holds the history lock from before selection until the
//! theme is recorded, so an overlapping run fails on the lock before making any
//! request. Dry runs write nothing and do not lock.
//!
//! Any error moves the run to `Failed` and is returned as-is for the caller to
//! report. Nothing is retried.

use super::generate::{generate_fortune, GenerationSettings};
use super::publish::publish_fortune;
use crate::ai::GeminiClient;
use crate::calendar::FortuneDate;
use crate::config::Config;
use crate::errors::AppResult;
use crate::history::HistoryStore;
use crate::social::{PostId, XClient};
use crate::themes::{weekday_theme, Theme, ThemeCatalog, ThemeStrategy};
use rand::Rng;
use std::fmt;
use tracing::{info, warn};

/// Stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing done yet
    Idle,
    /// A theme has been chosen
    ThemeSelected,
    /// Fortune text is ready
    ContentGenerated,
    /// The post is live and its theme recorded
    Published,
    /// The run stopped on an error
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::ThemeSelected => "theme_selected",
            RunState::ContentGenerated => "content_generated",
            RunState::Published => "published",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Per-invocation choices, usually from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// How the theme is chosen
    pub strategy: ThemeStrategy,
    /// Date the fortune is written for
    pub date: FortuneDate,
    /// Stop before publishing
    pub dry_run: bool,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The post was published with this id
    Published(PostId),
    /// Nothing was posted
    DryRun,
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Theme used
    pub theme: Theme,
    /// Full post text, suffix included
    pub post_text: String,
    /// Published id, or dry run
    pub outcome: RunOutcome,
    /// Last state reached
    pub final_state: RunState,
}

struct RunTracker {
    state: RunState,
}

impl RunTracker {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    fn advance(&mut self, next: RunState) {
        info!(from = %self.state, to = %next, "Run state changed");
        self.state = next;
    }
}

/// Executes one run against the services named in `config`.
///
/// # Errors
///
/// Returns the first error encountered; see [`crate::errors::AppError`].
pub fn run_fortune<R: Rng + ?Sized>(
    config: &Config,
    catalog: &ThemeCatalog,
    options: &RunOptions,
    rng: &mut R,
) -> AppResult<RunReport> {
    let mut tracker = RunTracker::new();
    let result = run_stages(config, catalog, options, rng, &mut tracker);
    if result.is_err() {
        warn!(failed_at = %tracker.state, "Run halted");
        tracker.advance(RunState::Failed);
    }
    result
}

fn run_stages<R: Rng + ?Sized>(
    config: &Config,
    catalog: &ThemeCatalog,
    options: &RunOptions,
    rng: &mut R,
    tracker: &mut RunTracker,
) -> AppResult<RunReport> {
    let store = HistoryStore::new(&config.history_path);
    let lock = if options.dry_run {
        None
    } else {
        Some(store.lock()?)
    };
    let history = store.load()?;

    let theme = match options.strategy {
        ThemeStrategy::Rotate => catalog.select(&history, config.history_window, rng).clone(),
        ThemeStrategy::Weekday => weekday_theme(options.date.weekday()),
    };
    info!(strategy = %options.strategy, "Selected theme {}", theme);
    tracker.advance(RunState::ThemeSelected);

    let template = config.post_template();
    let gemini = GeminiClient::new(&config.gemini_api_base, &config.gemini_api_key);
    let settings = GenerationSettings {
        model: &config.gemini_model,
        persona: &config.persona_prompt,
        budget: template.budget(),
    };
    let message = generate_fortune(&gemini, &settings, &theme, &options.date)?;
    tracker.advance(RunState::ContentGenerated);

    let post_text = template.compose(&message.text);
    let Some(lock) = lock else {
        info!("Dry run, not publishing");
        return Ok(RunReport {
            theme,
            post_text,
            outcome: RunOutcome::DryRun,
            final_state: tracker.state,
        });
    };

    let x = XClient::new(&config.x_api_base, config.x_credentials.clone());
    let post_id = publish_fortune(&x, &store, &lock, &template, &message)?;
    tracker.advance(RunState::Published);

    Ok(RunReport {
        theme,
        post_text,
        outcome: RunOutcome::Published(post_id),
        final_state: tracker.state,
    })
}
