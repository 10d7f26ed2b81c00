/*!
# Uranai Bot

Uranai Bot posts one AI-generated fortune ("uranai") to X per run. Each run picks
a theme it has not used recently, asks Gemini for a short fortune on that theme,
bounds the text so the post fits within 140 characters once the hashtag block is
appended, publishes it, and records the theme in a JSON history file.

## Core Features

- Theme rotation that avoids the last few recorded themes
- Optional fixed weekday topics
- Word-preserving trimming to the post budget
- History recorded only after a confirmed post, under an exclusive file lock
- Dry runs that generate without publishing

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Environment-based configuration and validation
- `errors`: Error types and exit codes
- `themes`: Theme catalog and selection
- `history`: Persistent theme history
- `ai`: Gemini client and prompt construction
- `social`: X client and OAuth 1.0a signing
- `ops`: Generation, publishing and the full run

## Usage Example

```rust,no_run
use rand::thread_rng;
use uranai_bot::calendar::FortuneDate;
use uranai_bot::ops::{run_fortune, RunOptions};
use uranai_bot::themes::{ThemeCatalog, ThemeStrategy};
use uranai_bot::Config;

fn main() -> uranai_bot::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let options = RunOptions {
        strategy: ThemeStrategy::Rotate,
        date: FortuneDate::at_offset(chrono::Utc::now(), config.utc_offset()?),
        dry_run: true,
    };
    let report = run_fortune(&config, &ThemeCatalog::builtin(), &options, &mut thread_rng())?;
    println!("{}", report.post_text);
    Ok(())
}
```
*/

/// Gemini client and prompt templates
pub mod ai;
/// Date handling for the posting day
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Persistent record of used themes
pub mod history;
/// High-level operations
pub mod ops;
/// X client and request signing
pub mod social;
/// Theme catalog and selection
pub mod themes;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
