use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stockreel(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stockreel").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PEXELS_API_KEY")
        .env_remove("STOCKREEL_CONFIG")
        .env_remove("STOCKREEL_BASE_URL")
        .env_remove("STOCKREEL_RETRY_BUDGET")
        .env_remove("STOCKREEL_TIMEOUT_MS")
        .env_remove("STOCKREEL_FFMPEG")
        .env_remove("STOCKREEL_LOG_LEVEL")
        .env_remove("STOCKREEL_LOG_JSON")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    stockreel(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("video"))
        .stdout(predicate::str::contains("slideshow"));
}

#[test]
fn test_missing_api_key_fails_before_network() {
    let dir = TempDir::new().unwrap();
    stockreel(&dir)
        // unroutable base url: reaching the network would fail differently
        .env("STOCKREEL_BASE_URL", "http://127.0.0.1:9")
        .args(["video", "--term", "forest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PEXELS_API_KEY"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_retry_budget_flag_is_bounded() {
    let dir = TempDir::new().unwrap();
    stockreel(&dir)
        .args(["video", "--term", "forest", "--retries", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--retries"));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("stockreel.toml"),
        "[provider]\nretry_budget = 9\n",
    )
    .unwrap();

    stockreel(&dir)
        .args(["preview", "--term", "forest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("retry_budget"));
}

#[test]
fn test_explicit_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    stockreel(&dir)
        .args(["--config", "nope.toml", "preview", "--term", "forest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn test_animate_rejects_flat_zoom() {
    let dir = TempDir::new().unwrap();
    stockreel(&dir)
        .env("STOCKREEL_FFMPEG", "stockreel-test-missing-ffmpeg")
        .args(["animate", "--image", "a.jpg", "--output", "a.mp4", "--max-zoom", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zoom"));
}

#[test]
fn test_environment_log_level_is_validated() {
    let dir = TempDir::new().unwrap();
    stockreel(&dir)
        .env("STOCKREEL_LOG_LEVEL", "loud")
        .args(["preview", "--term", "forest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level: loud"));
}

#[test]
fn test_configuration_is_logged_once_subscriber_is_installed() {
    let dir = TempDir::new().unwrap();
    stockreel(&dir)
        .env("STOCKREEL_BASE_URL", "http://127.0.0.1:9")
        .args(["--log-level", "debug", "preview", "--term", "forest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration loaded"))
        .stderr(predicate::str::contains("http://127.0.0.1:9"));
}
