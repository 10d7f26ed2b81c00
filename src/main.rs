/*!
# Uranai Bot

Posts one AI-generated fortune to X and records its theme.

## Usage

```
uranai-bot [OPTIONS]

Options:
      --dry-run                 Generate and print the post without publishing or recording history
  -s, --strategy <STRATEGY>     Theme strategy: rotate or weekday [default: rotate]
  -d, --date <DATE>             Write the fortune for a specific date (format: YYYY-MM-DD or YYYYMMDD)
      --seed <SEED>             Seed for theme selection
      --history <HISTORY>       History file to use instead of URANAI_HISTORY_PATH
      --log-format <FORMAT>     Log output format: text or json [default: text]
  -v, --verbose                 Enable verbose output
```

## Configuration

Required: `API_KEY`, `API_SECRET`, `ACCESS_TOKEN`, `ACCESS_SECRET` (X), and
`GEMINI_API_KEY`. See `uranai_bot::config` for the optional settings.

Logs go to stderr. The result line goes to stdout on success and stderr on
failure, and the process exit code identifies the failing stage.
*/

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;
use uranai_bot::calendar::FortuneDate;
use uranai_bot::cli::CliArgs;
use uranai_bot::config::Config;
use uranai_bot::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use uranai_bot::errors::AppResult;
use uranai_bot::ops::{run_fortune, RunOptions, RunOutcome, RunReport};
use uranai_bot::themes::ThemeCatalog;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    let correlation_id = uuid::Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    match run(&args) {
        Ok(report) => {
            match &report.outcome {
                RunOutcome::Published(id) => {
                    println!("Posted {} (theme: {})", id, report.theme);
                }
                RunOutcome::DryRun => {
                    println!("Dry run (theme: {})\n{}", report.theme, report.post_text);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            // The single place a run failure is logged.
            error!("Run failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Routes logs to stderr so stdout carries only the result line.
fn init_tracing(args: &CliArgs) {
    let default_level = if args.verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when embedded; keep going without ours.
    let _ = if args.log_format == LOG_FORMAT_JSON {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Loads configuration, resolves the run options, and performs one run.
///
/// # Errors
///
/// Returns any error from configuration, date parsing or the run itself.
fn run(args: &CliArgs) -> AppResult<RunReport> {
    info!("Starting {}", TRACING_SERVICE_NAME);
    debug!("CLI arguments: {:?}", args);

    let mut config = Config::load()?;
    if let Some(path) = args.history.as_deref() {
        config.set_history_path(path)?;
    }
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let date = match args.date.as_deref() {
        Some(raw) => FortuneDate::parse(raw)?,
        None => FortuneDate::at_offset(Utc::now(), config.utc_offset()?),
    };

    let options = RunOptions {
        strategy: args.strategy,
        date,
        dry_run: args.dry_run,
    };

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(thread_rng()),
    };

    run_fortune(&config, &ThemeCatalog::builtin(), &options, rng.as_mut())
}
