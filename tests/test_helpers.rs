#![allow(dead_code)]

use assert_cmd::Command;
use std::collections::HashMap;
use std::path::Path;
use uranai_bot::Config;

pub const TEST_MODEL: &str = "test-model";
pub const TEST_HASHTAGS: &str = "#fortune #daily";
pub const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";
pub const POST_PATH: &str = "/2/tweets";

/// Environment for a run against a single mock server hosting both APIs.
pub fn test_env(server_url: &str, history: &Path) -> HashMap<String, String> {
    [
        ("API_KEY", "consumer-key"),
        ("API_SECRET", "consumer-secret"),
        ("ACCESS_TOKEN", "access-token"),
        ("ACCESS_SECRET", "access-secret"),
        ("GEMINI_API_KEY", "gemini-key"),
        ("GEMINI_MODEL", TEST_MODEL),
        ("GEMINI_API_BASE", server_url),
        ("X_API_BASE", server_url),
        ("URANAI_HASHTAGS", TEST_HASHTAGS),
        ("URANAI_HISTORY_PATH", history.to_str().expect("utf-8 temp path")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Builds a validated `Config` from `test_env`.
pub fn test_config(server_url: &str, history: &Path) -> Config {
    let env = test_env(server_url, history);
    let config = Config::from_lookup(|key| env.get(key).cloned()).expect("load test config");
    config.validate().expect("valid test config");
    config
}

/// A Gemini response carrying `text` as its only part.
pub fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
    .to_string()
}

/// An X response for a created post.
pub fn post_body(id: &str) -> String {
    serde_json::json!({"data": {"id": id, "text": "ignored"}}).to_string()
}

/// Creates a `Command` for the `uranai-bot` binary with a clean environment.
pub fn base_command() -> Command {
    let mut cmd = Command::cargo_bin("uranai-bot").expect("uranai-bot binary not built");
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd
}
