//! Error handling utilities for uranai-bot.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur during a run, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//! Each variant maps to a distinct process exit code via [`AppError::exit_code`].

use crate::constants::{
    EXIT_CODE_CONFIG, EXIT_CODE_GENERATION, EXIT_CODE_IO, EXIT_CODE_LOCK, EXIT_CODE_PUBLISH,
    EXIT_CODE_STORAGE,
};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when attempting to lock the history file.
///
/// # Examples
///
/// ```
/// use uranai_bot::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/srv/uranai/post_history.json.lock"),
/// };
///
/// assert!(format!("{}", error).contains("held by another process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the history is already locked by another process.
    #[error("History file is locked by another process: {path}. Another run is probably still in progress; wait for it to finish.")]
    FileBusy {
        /// The path to the lock file that is held
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Errors raised while reading or writing the post history.
///
/// # Examples
///
/// ```
/// use uranai_bot::errors::StorageError;
/// use std::path::PathBuf;
///
/// let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
/// let error = StorageError::Malformed {
///     path: PathBuf::from("post_history.json"),
///     source,
/// };
/// assert!(format!("{}", error).contains("post_history.json"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// The history file exists but could not be read.
    #[error("Failed to read history file {path}: {source}")]
    Read {
        /// Path of the history file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The history file does not contain a valid `{"posts": [...]}` record.
    #[error("History file {path} is malformed: {source}. Fix or remove the file before the next run.")]
    Malformed {
        /// Path of the history file
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The history record could not be written back.
    #[error("Failed to write history file {path}: {source}")]
    Write {
        /// Path of the history file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Errors raised by the text-generation service.
///
/// # Examples
///
/// ```
/// use uranai_bot::errors::GenerationError;
///
/// let error = GenerationError::EmptyResponse;
/// assert!(format!("{}", error).contains("empty"));
/// ```
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The Gemini API could not be reached.
    #[error("Gemini API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The Gemini API answered with a non-success status.
    #[error("Gemini API returned HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The response body could not be understood.
    #[error("Invalid response from Gemini: {0}")]
    InvalidResponse(String),

    /// The response parsed but contained no usable text.
    #[error("Gemini API response was empty")]
    EmptyResponse,
}

/// Errors raised by the social posting service.
///
/// # Examples
///
/// ```
/// use uranai_bot::errors::PublishError;
///
/// let error = PublishError::Rejected {
///     status: 403,
///     body: "duplicate content".to_string(),
/// };
/// assert!(format!("{}", error).contains("403"));
/// ```
#[derive(Debug, Error)]
pub enum PublishError {
    /// The X API could not be reached.
    #[error("X API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The X API refused the post.
    #[error("X API returned HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The response body could not be understood.
    #[error("Invalid response from X API: {0}")]
    InvalidResponse(String),

    /// The request could not be signed.
    #[error("Failed to sign X API request: {0}")]
    Signing(String),
}

/// Represents all possible errors that can occur during a run.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. None of them is retried; each one ends the run.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use uranai_bot::errors::AppError;
///
/// let error = AppError::Config("Missing GEMINI_API_KEY".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing GEMINI_API_KEY");
/// assert_eq!(error.exit_code(), 2);
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the text-generation service.
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Errors from the social posting service.
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Errors reading or writing the post history.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors related to locking the post history.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),
}

impl AppError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => EXIT_CODE_CONFIG,
            AppError::Io(_) => EXIT_CODE_IO,
            AppError::Generation(_) => EXIT_CODE_GENERATION,
            AppError::Publish(_) => EXIT_CODE_PUBLISH,
            AppError::Storage(_) => EXIT_CODE_STORAGE,
            AppError::Lock(_) => EXIT_CODE_LOCK,
        }
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use uranai_bot::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Config("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Missing API_KEY".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Missing API_KEY"
        );

        let app_error = AppError::Generation(GenerationError::EmptyResponse);
        assert_eq!(
            format!("{}", app_error),
            "Generation error: Gemini API response was empty"
        );

        let app_error = AppError::Publish(PublishError::Rejected {
            status: 401,
            body: "Unauthorized".to_string(),
        });
        assert!(format!("{}", app_error).contains("Publish error"));
        assert!(format!("{}", app_error).contains("401"));
        assert!(format!("{}", app_error).contains("Unauthorized"));

        let lock_error = LockError::FileBusy {
            path: PathBuf::from("/tmp/post_history.json.lock"),
        };
        let app_error = AppError::Lock(lock_error);
        assert!(format!("{}", app_error).contains("File locking error"));
        assert!(format!("{}", app_error).contains("/tmp/post_history.json.lock"));
    }

    #[test]
    fn test_storage_error_variants() {
        let error = StorageError::Read {
            path: PathBuf::from("/data/history.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(format!("{}", error).contains("Failed to read"));
        assert!(format!("{}", error).contains("permission denied"));

        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = StorageError::Malformed {
            path: PathBuf::from("/data/history.json"),
            source,
        };
        assert!(format!("{}", error).contains("malformed"));
        assert!(format!("{}", error).contains("/data/history.json"));
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let errors = vec![
            AppError::Config("x".to_string()),
            AppError::Io(io::Error::other("x")),
            AppError::Generation(GenerationError::EmptyResponse),
            AppError::Publish(PublishError::Signing("x".to_string())),
            AppError::Storage(StorageError::Write {
                path: PathBuf::from("h.json"),
                source: io::Error::other("disk full"),
            }),
            AppError::Lock(LockError::FileBusy {
                path: PathBuf::from("h.json.lock"),
            }),
        ];

        let mut codes: Vec<u8> = errors.iter().map(AppError::exit_code).collect();
        assert!(codes.iter().all(|&code| code != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_result_combinators() {
        let io_result: Result<(), io::Error> = Err(io::Error::other("test error"));
        let app_result: AppResult<()> = io_result.map_err(AppError::Io);

        assert!(app_result.is_err());
        assert_eq!(app_result.unwrap_err().exit_code(), EXIT_CODE_IO);
    }
}
