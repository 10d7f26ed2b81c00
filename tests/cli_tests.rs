mod test_helpers;

use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use test_helpers::{base_command, gemini_body, post_body, test_env, GENERATE_PATH, POST_PATH};

#[test]
fn test_cli_help() {
    base_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--strategy"));
}

#[test]
fn test_cli_missing_secrets() {
    base_command()
        .env("API_KEY", "only-this-one")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("GEMINI_API_KEY"))
        .stderr(predicate::str::contains("ACCESS_SECRET"));
}

#[test]
fn test_cli_invalid_date() {
    let temp_dir = tempdir().unwrap();
    let history = temp_dir.path().join("post_history.json");
    let server = mockito::Server::new();

    base_command()
        .envs(&test_env(&server.url(), &history))
        .arg("--date")
        .arg("not-a-date")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_cli_invalid_strategy() {
    base_command()
        .arg("--strategy")
        .arg("random")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown strategy"));
}

#[test]
fn test_cli_successful_post() {
    let temp_dir = tempdir().unwrap();
    let history = temp_dir.path().join("post_history.json");

    let mut server = mockito::Server::new();
    let _generate = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(gemini_body("心穏やかに過ごせる一日です。"))
        .create();
    let post = server
        .mock("POST", POST_PATH)
        .with_status(201)
        .with_body(post_body("1790000000000000000"))
        .create();

    base_command()
        .envs(&test_env(&server.url(), &history))
        .args(["--date", "2024-03-15", "--seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted 1790000000000000000"));

    post.assert();
    let saved = fs::read_to_string(&history).unwrap();
    let record: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(record["posts"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_cli_publish_failure_exit_code() {
    let temp_dir = tempdir().unwrap();
    let history = temp_dir.path().join("post_history.json");
    let original = "{\n  \"posts\": [\n    \"月の満ち欠けと運勢\"\n  ]\n}\n";
    fs::write(&history, original).unwrap();

    let mut server = mockito::Server::new();
    let _generate = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(gemini_body("fortune"))
        .create();
    let _post = server
        .mock("POST", POST_PATH)
        .with_status(500)
        .with_body("Internal Error")
        .create();

    base_command()
        .envs(&test_env(&server.url(), &history))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("X API returned HTTP 500"));

    assert_eq!(fs::read_to_string(&history).unwrap(), original);
}

#[test]
fn test_cli_generation_failure_exit_code() {
    let temp_dir = tempdir().unwrap();
    let history = temp_dir.path().join("post_history.json");

    let mut server = mockito::Server::new();
    let _generate = server
        .mock("POST", GENERATE_PATH)
        .with_status(429)
        .with_body("quota exceeded")
        .create();
    let post = server.mock("POST", POST_PATH).expect(0).create();

    base_command()
        .envs(&test_env(&server.url(), &history))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Gemini API returned HTTP 429"));

    post.assert();
    assert!(!history.exists());
}

#[test]
fn test_cli_dry_run_with_history_override() {
    let temp_dir = tempdir().unwrap();
    let env_history = temp_dir.path().join("unused.json");
    let flag_history = temp_dir.path().join("flag.json");
    fs::write(&flag_history, "{\"posts\": []}").unwrap();

    let mut server = mockito::Server::new();
    let _generate = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(gemini_body("良い知らせが届きます。"))
        .expect(2)
        .create();
    let post = server.mock("POST", POST_PATH).expect(0).create();

    let run = || {
        base_command()
            .envs(&test_env(&server.url(), &env_history))
            .args(["--dry-run", "--seed", "5", "--history"])
            .arg(&flag_history)
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();

    assert!(first.status.success());
    let stdout = String::from_utf8(first.stdout).unwrap();
    assert!(stdout.contains("Dry run"));
    assert!(stdout.contains("良い知らせが届きます。\n#fortune #daily"));
    // Same seed, same theme.
    assert_eq!(stdout, String::from_utf8(second.stdout).unwrap());

    post.assert();
    assert!(!env_history.exists());
    assert_eq!(fs::read_to_string(&flag_history).unwrap(), "{\"posts\": []}");
}

#[test]
fn test_cli_json_logs_go_to_stderr() {
    let temp_dir = tempdir().unwrap();
    let history = temp_dir.path().join("post_history.json");

    let mut server = mockito::Server::new();
    let _generate = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(gemini_body("fortune"))
        .create();

    base_command()
        .envs(&test_env(&server.url(), &history))
        .args(["--dry-run", "--log-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"level\"").not())
        .stderr(predicate::str::contains("\"correlation_id\""));
}
