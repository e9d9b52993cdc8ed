#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use assert_cmd::Command;
use chrono::NaiveDate;
use finz_config::Config;
use once_cell::sync::Lazy;
use tempfile::TempDir;

pub const BIN_NAME: &str = "finz_cli";
pub const TODAY: &str = "2025-10-18";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").expect("valid date")
}

pub fn default_config() -> Config {
    Config::default()
}

/// CLI invocation isolated from the user's configuration, with a pinned date
/// and plain output.
pub fn cli() -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINZ_HOME", temp_home())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(["--plain", "--today", TODAY]);
    cmd
}
