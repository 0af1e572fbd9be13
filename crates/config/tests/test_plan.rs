//! Test plan for the `relay-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, environment overrides, and validation behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use relay_config::{load, AppConfig, HttpConfig, PasswordHashConfig, PushConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "RELAY_CONFIG",
    "RELAY__AUTH__PASSWORD_HASH__ITERATIONS",
    "RELAY__AUTH__PASSWORD_HASH__MEMORY_KIB",
    "RELAY__AUTH__PASSWORD_HASH__PARALLELISM",
    "RELAY__DATABASE__MAX_CONNECTIONS",
    "RELAY__DATABASE__URL",
    "RELAY__HTTP__ADDRESS",
    "RELAY__HTTP__PORT",
    "RELAY__PUSH__API_KEY",
    "RELAY__PUSH__ENDPOINT",
    "RELAY__PUSH__REQUEST_TIMEOUT_SECONDS",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn isolated(dir: &Path) -> Self {
        let mut ctx = Self::new();
        ctx.reset_environment();
        ctx.set_current_dir(dir);
        ctx
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let _ctx = TestContext::isolated(temp_dir.path());

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.http.port, defaults.http.port);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(
        config.database.max_connections,
        defaults.database.max_connections
    );
    assert_eq!(config.auth.password_hash, defaults.auth.password_hash);
    assert_eq!(config.push.endpoint, defaults.push.endpoint);
    assert!(config.push.api_key.is_none());
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let _ctx = TestContext::isolated(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "relay.toml",
        r#"
        [http]
        port = 4242
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/relay.toml",
        r#"
        [http]
        port = 5151
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.http.port, 4242);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let _ctx = TestContext::isolated(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "relay.toml",
        r#"
        [database]
        max_connections = 50

        [auth.password_hash]
        iterations = 4
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(config.http.port, defaults.http.port);
    assert_eq!(config.database.max_connections, 50);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(config.auth.password_hash.iterations, 4);
    assert_eq!(
        config.auth.password_hash.memory_kib,
        defaults.auth.password_hash.memory_kib
    );
}

#[test]
#[serial]
fn load_honours_explicit_config_path() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::isolated(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "elsewhere/custom.toml",
        r#"
        [push]
        endpoint = "http://localhost:9999/send"
        api_key = "file-key"
        "#,
    );
    ctx.set_var(
        "RELAY_CONFIG",
        temp_dir.path().join("elsewhere/custom.toml").display().to_string(),
    );

    let config = load().expect("configuration load should read RELAY_CONFIG");
    assert_eq!(config.push.endpoint, "http://localhost:9999/send");
    assert_eq!(config.push.api_key.as_deref(), Some("file-key"));
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::isolated(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "relay.toml",
        r#"
        [http]
        port = 3030
        "#,
    );

    ctx.set_var("RELAY__HTTP__PORT", "8080");
    ctx.set_var("RELAY__PUSH__API_KEY", "env-key");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.http.port, 8080);
    assert_eq!(config.push.api_key.as_deref(), Some("env-key"));
}

#[test]
#[serial]
fn load_rejects_zero_hash_iterations() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::isolated(temp_dir.path());

    ctx.set_var("RELAY__AUTH__PASSWORD_HASH__ITERATIONS", "0");

    let error = load().expect_err("zero iterations must be rejected");
    assert!(
        error.to_string().contains("iterations"),
        "unexpected error message: {error}"
    );
}

#[test]
#[serial]
fn load_rejects_zero_push_timeout() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::isolated(temp_dir.path());

    ctx.set_var("RELAY__PUSH__REQUEST_TIMEOUT_SECONDS", "0");

    let error = load().expect_err("a zero push timeout must be rejected");
    assert!(
        error.to_string().contains("request_timeout_seconds"),
        "unexpected error message: {error}"
    );
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let _ctx = TestContext::isolated(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "relay.toml",
        r#"
        [http]
        port = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration") || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn push_config_defaults_leave_api_key_unset() {
    let defaults = PushConfig::default();
    assert!(defaults.api_key.is_none());
    assert!(defaults.endpoint.starts_with("https://"));
}

#[test]
fn password_hash_defaults_match_argon2_recommendation() {
    let defaults = PasswordHashConfig::default();
    assert_eq!(defaults.memory_kib, 19_456);
    assert_eq!(defaults.iterations, 2);
    assert_eq!(defaults.parallelism, 1);
}

#[test]
fn http_config_defaults_match_expected_host_and_port() {
    let defaults = HttpConfig::default();
    assert_eq!(defaults.address, "127.0.0.1");
    assert_eq!(defaults.port, 7070);
}
