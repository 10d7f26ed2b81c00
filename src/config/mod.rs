//! Configuration management for uranai-bot.
//!
//! This module handles loading and validating configuration settings from environment
//! variables. The five service secrets are required and loading fails fast when any
//! of them is absent; everything else has a default.
//!
//! # Environment Variables
//!
//! - `API_KEY`, `API_SECRET`, `ACCESS_TOKEN`, `ACCESS_SECRET`: X API OAuth 1.0a credentials
//! - `GEMINI_API_KEY`: Gemini API key
//! - `URANAI_HISTORY_PATH`: Path to the history file (defaults to `post_history.json`)
//! - `URANAI_HASHTAGS`: Hashtag block appended to every post
//! - `URANAI_PERSONA`: Persona and style instructions for the prompt
//! - `URANAI_HISTORY_WINDOW`: Number of recent themes to avoid (defaults to 5)
//! - `URANAI_UTC_OFFSET_HOURS`: Offset used for the posting date (defaults to 9, JST)
//! - `GEMINI_MODEL`, `GEMINI_API_BASE`, `X_API_BASE`: Service endpoints

use crate::ai::prompts::DEFAULT_PERSONA;
use crate::constants::{
    DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL, DEFAULT_HASHTAGS, DEFAULT_HISTORY_PATH,
    DEFAULT_HISTORY_WINDOW, DEFAULT_UTC_OFFSET_HOURS, DEFAULT_X_API_BASE, ENV_VAR_ACCESS_SECRET,
    ENV_VAR_ACCESS_TOKEN, ENV_VAR_API_KEY, ENV_VAR_API_SECRET, ENV_VAR_GEMINI_API_BASE,
    ENV_VAR_GEMINI_API_KEY, ENV_VAR_GEMINI_MODEL, ENV_VAR_HASHTAGS, ENV_VAR_HISTORY_PATH,
    ENV_VAR_HISTORY_WINDOW, ENV_VAR_PERSONA, ENV_VAR_UTC_OFFSET_HOURS, ENV_VAR_X_API_BASE,
    MAX_UTC_OFFSET_HOURS, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use crate::ops::publish::PostTemplate;
use chrono::FixedOffset;
use std::env;
use std::fmt;
use std::path::PathBuf;
use zeroize::Zeroize;

/// OAuth 1.0a credentials for the X API.
///
/// The secrets are wiped from memory when the value is dropped.
#[derive(Clone, Default)]
pub struct XCredentials {
    /// Consumer (API) key
    pub api_key: String,
    /// Consumer (API) secret
    pub api_secret: String,
    /// User access token
    pub access_token: String,
    /// User access token secret
    pub access_secret: String,
}

impl fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XCredentials")
            .field("api_key", &REDACTED_PLACEHOLDER)
            .field("api_secret", &REDACTED_PLACEHOLDER)
            .field("access_token", &REDACTED_PLACEHOLDER)
            .field("access_secret", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Drop for XCredentials {
    fn drop(&mut self) {
        self.api_key.zeroize();
        self.api_secret.zeroize();
        self.access_token.zeroize();
        self.access_secret.zeroize();
    }
}

/// Configuration for uranai-bot.
///
/// Built once at process start and passed by reference to every component.
///
/// # Examples
///
/// Loading configuration from an explicit lookup instead of the process environment:
/// ```
/// use std::collections::HashMap;
/// use uranai_bot::Config;
///
/// let vars: HashMap<&str, &str> = [
///     ("API_KEY", "k"),
///     ("API_SECRET", "s"),
///     ("ACCESS_TOKEN", "t"),
///     ("ACCESS_SECRET", "ts"),
///     ("GEMINI_API_KEY", "g"),
/// ]
/// .into_iter()
/// .collect();
///
/// let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
/// assert_eq!(config.history_window, 5);
/// ```
pub struct Config {
    /// X API credentials.
    pub x_credentials: XCredentials,

    /// Gemini API key.
    pub gemini_api_key: String,

    /// Gemini model used for generation.
    pub gemini_model: String,

    /// Base URL of the Gemini API.
    pub gemini_api_base: String,

    /// Base URL of the X API.
    pub x_api_base: String,

    /// Location of the JSON history file.
    pub history_path: PathBuf,

    /// Hashtag block appended to every post, after a newline.
    pub hashtags: String,

    /// Persona and style instructions embedded in every prompt.
    pub persona_prompt: String,

    /// Number of recent history entries avoided by the selector.
    pub history_window: usize,

    /// Offset from UTC, in hours, used to compute the posting date.
    pub utc_offset_hours: i32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("x_credentials", &self.x_credentials)
            .field("gemini_api_key", &REDACTED_PLACEHOLDER)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("x_api_base", &self.x_api_base)
            .field("history_path", &self.history_path)
            .field("hashtags", &self.hashtags)
            .field("history_window", &self.history_window)
            .field("utc_offset_hours", &self.utc_offset_hours)
            .finish()
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        self.gemini_api_key.zeroize();
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required secret is missing or an optional
    /// setting cannot be parsed.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as missing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - Any of the five required secrets is missing (all missing names are reported)
    /// - A numeric setting does not parse
    /// - The history path cannot be expanded
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let required = [
            ENV_VAR_API_KEY,
            ENV_VAR_API_SECRET,
            ENV_VAR_ACCESS_TOKEN,
            ENV_VAR_ACCESS_SECRET,
            ENV_VAR_GEMINI_API_KEY,
        ];
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let x_credentials = XCredentials {
            api_key: get(ENV_VAR_API_KEY).unwrap_or_default(),
            api_secret: get(ENV_VAR_API_SECRET).unwrap_or_default(),
            access_token: get(ENV_VAR_ACCESS_TOKEN).unwrap_or_default(),
            access_secret: get(ENV_VAR_ACCESS_SECRET).unwrap_or_default(),
        };

        let history_raw =
            get(ENV_VAR_HISTORY_PATH).unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string());

        let history_window = match get(ENV_VAR_HISTORY_WINDOW) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AppError::Config(format!(
                    "{} must be a non-negative integer: {}",
                    ENV_VAR_HISTORY_WINDOW, e
                ))
            })?,
            None => DEFAULT_HISTORY_WINDOW,
        };

        let utc_offset_hours = match get(ENV_VAR_UTC_OFFSET_HOURS) {
            Some(raw) => raw.trim().parse::<i32>().map_err(|e| {
                AppError::Config(format!(
                    "{} must be an integer: {}",
                    ENV_VAR_UTC_OFFSET_HOURS, e
                ))
            })?,
            None => DEFAULT_UTC_OFFSET_HOURS,
        };

        Ok(Config {
            x_credentials,
            gemini_api_key: get(ENV_VAR_GEMINI_API_KEY).unwrap_or_default(),
            gemini_model: get(ENV_VAR_GEMINI_MODEL)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: get(ENV_VAR_GEMINI_API_BASE)
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            x_api_base: get(ENV_VAR_X_API_BASE).unwrap_or_else(|| DEFAULT_X_API_BASE.to_string()),
            history_path: expand_path(&history_raw)?,
            hashtags: get(ENV_VAR_HASHTAGS).unwrap_or_else(|| DEFAULT_HASHTAGS.to_string()),
            persona_prompt: get(ENV_VAR_PERSONA).unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            history_window,
            utc_offset_hours,
        })
    }

    /// Overrides the history path, expanding `~` and environment variables.
    pub fn set_history_path(&mut self, raw: &str) -> AppResult<()> {
        self.history_path = expand_path(raw)?;
        Ok(())
    }

    /// The post layout derived from the configured hashtags.
    pub fn post_template(&self) -> PostTemplate {
        PostTemplate::new(self.hashtags.clone())
    }

    /// The fixed offset used to compute the local posting date.
    pub fn utc_offset(&self) -> AppResult<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "UTC offset out of range: {} hours",
                    self.utc_offset_hours
                ))
            })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - A secret is empty
    /// - The history path is empty
    /// - The history window is zero
    /// - The UTC offset is outside -23..=23 hours
    /// - The hashtag block leaves no room for generated text
    pub fn validate(&self) -> AppResult<()> {
        let secrets = [
            (ENV_VAR_API_KEY, &self.x_credentials.api_key),
            (ENV_VAR_API_SECRET, &self.x_credentials.api_secret),
            (ENV_VAR_ACCESS_TOKEN, &self.x_credentials.access_token),
            (ENV_VAR_ACCESS_SECRET, &self.x_credentials.access_secret),
            (ENV_VAR_GEMINI_API_KEY, &self.gemini_api_key),
        ];
        for (name, value) in secrets {
            if value.is_empty() {
                return Err(AppError::Config(format!("{} is empty", name)));
            }
        }

        if self.history_path.as_os_str().is_empty() {
            return Err(AppError::Config("History path is empty".to_string()));
        }

        if self.history_window == 0 {
            return Err(AppError::Config(
                "History window must be at least 1".to_string(),
            ));
        }

        if !(-MAX_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&self.utc_offset_hours) {
            return Err(AppError::Config(format!(
                "UTC offset must be between -{max} and {max} hours, got {}",
                self.utc_offset_hours,
                max = MAX_UTC_OFFSET_HOURS
            )));
        }

        if self.post_template().budget() == 0 {
            return Err(AppError::Config(
                "Hashtag block is too long: no characters left for the fortune".to_string(),
            ));
        }

        Ok(())
    }
}

fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    let path = PathBuf::from(expanded.into_owned());
    if path.as_os_str().is_empty() {
        return Err(AppError::Config("History path is empty".to_string()));
    }
    Ok(path)
}
