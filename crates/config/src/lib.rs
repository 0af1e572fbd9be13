use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "relay.toml",
    "config/relay.toml",
    "crates/config/relay.toml",
    "../relay.toml",
    "../config/relay.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub push: PushConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://relay.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub password_hash: PasswordHashConfig,
}

/// Work factor for the Argon2id password hash.
///
/// The parameters are fixed for the lifetime of the process. Hashes record the
/// parameters they were produced with, so raising them later does not lock out
/// existing users.
///
/// ```
/// use relay_config::PasswordHashConfig;
///
/// let params = PasswordHashConfig::default();
/// assert_eq!(params.memory_kib, 19_456);
/// assert_eq!(params.iterations, 2);
/// assert_eq!(params.parallelism, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHashConfig {
    #[serde(default = "PasswordHashConfig::default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "PasswordHashConfig::default_iterations")]
    pub iterations: u32,
    #[serde(default = "PasswordHashConfig::default_parallelism")]
    pub parallelism: u32,
}

impl PasswordHashConfig {
    const fn default_memory_kib() -> u32 {
        19_456
    }

    const fn default_iterations() -> u32 {
        2
    }

    const fn default_parallelism() -> u32 {
        1
    }
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: Self::default_memory_kib(),
            iterations: Self::default_iterations(),
            parallelism: Self::default_parallelism(),
        }
    }
}

/// Settings for the HTTP push gateway.
///
/// ```
/// use relay_config::PushConfig;
///
/// let push = PushConfig::default();
/// assert!(push.api_key.is_none());
/// assert_eq!(push.request_timeout_seconds, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default = "PushConfig::default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "PushConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl PushConfig {
    fn default_endpoint() -> String {
        "https://fcm.googleapis.com/v1/projects/relay/messages:send".to_string()
    }

    const fn default_request_timeout() -> u64 {
        10
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            api_key: None,
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use relay_config::load;
///
/// std::env::remove_var("RELAY_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();
    let hash = &defaults.auth.password_hash;

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("auth.password_hash.memory_kib", i64::from(hash.memory_kib))?
        .set_default("auth.password_hash.iterations", i64::from(hash.iterations))?
        .set_default("auth.password_hash.parallelism", i64::from(hash.parallelism))?
        .set_default("push.endpoint", defaults.push.endpoint.clone())?
        .set_default(
            "push.request_timeout_seconds",
            i64::try_from(defaults.push.request_timeout_seconds).unwrap_or(i64::MAX),
        )?;

    let environment_overrides = config::Environment::with_prefix("RELAY").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("RELAY_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via RELAY_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    validate(&config)?;

    debug!(
        http.address = %config.http.address,
        http.port = config.http.port,
        database.url = %config.database.url,
        push.endpoint = %config.push.endpoint,
        push.api_key_set = config.push.api_key.is_some(),
        "loaded relay configuration"
    );
    Ok(config)
}

fn validate(config: &AppConfig) -> anyhow::Result<()> {
    let hash = &config.auth.password_hash;
    ensure!(
        hash.memory_kib >= hash.parallelism.saturating_mul(8),
        "invalid configuration: auth.password_hash.memory_kib must be at least 8 * parallelism"
    );
    ensure!(
        hash.iterations >= 1,
        "invalid configuration: auth.password_hash.iterations must be at least 1"
    );
    ensure!(
        hash.parallelism >= 1,
        "invalid configuration: auth.password_hash.parallelism must be at least 1"
    );
    ensure!(
        config.database.max_connections >= 1,
        "invalid configuration: database.max_connections must be at least 1"
    );
    ensure!(
        config.push.request_timeout_seconds >= 1,
        "invalid configuration: push.request_timeout_seconds must be at least 1"
    );
    Ok(())
}
