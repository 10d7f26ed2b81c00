use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::themes::ThemeStrategy;
use clap::Parser;

/// Posts a daily AI-generated fortune to X
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Generate and print the post without publishing or recording history
    #[clap(long)]
    pub dry_run: bool,

    /// Theme strategy: "rotate" avoids recent themes, "weekday" uses a fixed topic per day
    #[clap(short = 's', long, default_value = "rotate", value_parser = parse_strategy)]
    pub strategy: ThemeStrategy,

    /// Write the fortune for a specific date (format: YYYY-MM-DD or YYYYMMDD)
    #[clap(short = 'd', long)]
    pub date: Option<String>,

    /// Seed for theme selection, for reproducible runs
    #[clap(long)]
    pub seed: Option<u64>,

    /// History file to use instead of URANAI_HISTORY_PATH
    #[clap(long)]
    pub history: Option<String>,

    /// Log output format
    #[clap(long, default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

fn parse_strategy(value: &str) -> Result<ThemeStrategy, String> {
    value.parse()
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}
