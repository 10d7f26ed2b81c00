//! Constants used throughout the application.
//!
//! This module contains all constants used in uranai-bot, organized into
//! logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "uranai-bot";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Posts a daily AI-generated fortune to X";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is given.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Required secrets
/// X API consumer key.
pub const ENV_VAR_API_KEY: &str = "API_KEY";
/// X API consumer secret.
pub const ENV_VAR_API_SECRET: &str = "API_SECRET";
/// X API access token.
pub const ENV_VAR_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
/// X API access token secret.
pub const ENV_VAR_ACCESS_SECRET: &str = "ACCESS_SECRET";
/// Gemini API key.
pub const ENV_VAR_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

// Optional settings
/// Path of the JSON history file.
pub const ENV_VAR_HISTORY_PATH: &str = "URANAI_HISTORY_PATH";
/// Hashtag block appended to every post.
pub const ENV_VAR_HASHTAGS: &str = "URANAI_HASHTAGS";
/// Persona and style instructions embedded in the prompt.
pub const ENV_VAR_PERSONA: &str = "URANAI_PERSONA";
/// Number of recent history entries consulted for de-duplication.
pub const ENV_VAR_HISTORY_WINDOW: &str = "URANAI_HISTORY_WINDOW";
/// UTC offset, in hours, used to compute the local posting date.
pub const ENV_VAR_UTC_OFFSET_HOURS: &str = "URANAI_UTC_OFFSET_HOURS";
/// Gemini model name.
pub const ENV_VAR_GEMINI_MODEL: &str = "GEMINI_MODEL";
/// Gemini API base URL.
pub const ENV_VAR_GEMINI_API_BASE: &str = "GEMINI_API_BASE";
/// X API base URL.
pub const ENV_VAR_X_API_BASE: &str = "X_API_BASE";

/// Default history file, relative to the working directory.
pub const DEFAULT_HISTORY_PATH: &str = "post_history.json";
/// Default hashtag block.
pub const DEFAULT_HASHTAGS: &str = "#AI占い #今日の運勢 #未来の羅針盤";
/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// Default X API base URL.
pub const DEFAULT_X_API_BASE: &str = "https://api.twitter.com";
/// Default UTC offset (JST).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;
/// Largest accepted absolute UTC offset, in hours.
pub const MAX_UTC_OFFSET_HOURS: i32 = 23;

// Selection & Formatting
/// Number of recent history entries consulted by default.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;
/// Maximum post length, in characters.
pub const POST_MAX_CHARS: usize = 140;

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Suffix appended to the history path to form the lock file path.
pub const LOCK_FILE_SUFFIX: &str = ".lock";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Date format used in prompts.
pub const PROMPT_DATE_FORMAT: &str = "%Y年%m月%d日";
/// Weekday format used in prompts.
pub const PROMPT_WEEKDAY_FORMAT: &str = "%A";

// Exit Codes
/// Exit code for I/O errors outside the history store.
pub const EXIT_CODE_IO: u8 = 1;
/// Exit code for configuration errors.
pub const EXIT_CODE_CONFIG: u8 = 2;
/// Exit code for generation failures.
pub const EXIT_CODE_GENERATION: u8 = 3;
/// Exit code for publishing failures.
pub const EXIT_CODE_PUBLISH: u8 = 4;
/// Exit code for history storage failures.
pub const EXIT_CODE_STORAGE: u8 = 5;
/// Exit code for history lock failures.
pub const EXIT_CODE_LOCK: u8 = 6;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "uranai-bot";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
