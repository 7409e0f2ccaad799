use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "roster.toml",
    "config/roster.toml",
    "crates/config/roster.toml",
    "../roster.toml",
    "../config/roster.toml",
    "../crates/config/roster.toml",
];

/// Signing secret used when nothing else is configured. Only suitable for local development.
pub const DEVELOPMENT_TOKEN_SECRET: &str = "roster-development-secret-change-me";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
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
            url: "sqlite://roster.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Token and credential settings.
///
/// ```
/// use roster_config::AuthConfig;
///
/// let auth = AuthConfig::default();
/// assert_eq!(auth.token_ttl_seconds, 86_400);
/// assert_eq!(auth.token_issuer, "roster");
/// assert!(auth.uses_development_secret());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_token_secret")]
    pub token_secret: String,
    #[serde(default = "AuthConfig::default_token_issuer")]
    pub token_issuer: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
    #[serde(default)]
    pub hashing: HashingConfig,
}

impl AuthConfig {
    fn default_token_secret() -> String {
        DEVELOPMENT_TOKEN_SECRET.to_string()
    }

    fn default_token_issuer() -> String {
        "roster".to_string()
    }

    const fn default_token_ttl() -> u64 {
        86_400
    }

    pub fn uses_development_secret(&self) -> bool {
        self.token_secret == DEVELOPMENT_TOKEN_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Self::default_token_secret(),
            token_issuer: Self::default_token_issuer(),
            token_ttl_seconds: Self::default_token_ttl(),
            hashing: HashingConfig::default(),
        }
    }
}

/// Argon2id cost parameters. Defaults follow the OWASP baseline (19 MiB, 2 passes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    #[serde(default = "HashingConfig::default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "HashingConfig::default_iterations")]
    pub iterations: u32,
    #[serde(default = "HashingConfig::default_parallelism")]
    pub parallelism: u32,
}

impl HashingConfig {
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

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Self::default_memory_kib(),
            iterations: Self::default_iterations(),
            parallelism: Self::default_parallelism(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "DirectoryConfig::default_max_page_size")]
    pub max_page_size: u32,
}

impl DirectoryConfig {
    const fn default_max_page_size() -> u32 {
        100
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            max_page_size: Self::default_max_page_size(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use roster_config::load;
///
/// std::env::remove_var("ROSTER_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    load_from(None)
}

/// Like [`load`], but an explicit `path` wins over `ROSTER_CONFIG` and the file search.
pub fn load_from(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let token_ttl = i64::try_from(defaults.auth.token_ttl_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("auth.token_secret", defaults.auth.token_secret.clone())?
        .set_default("auth.token_issuer", defaults.auth.token_issuer.clone())?
        .set_default("auth.token_ttl_seconds", token_ttl)?
        .set_default(
            "auth.hashing.memory_kib",
            i64::from(defaults.auth.hashing.memory_kib),
        )?
        .set_default(
            "auth.hashing.iterations",
            i64::from(defaults.auth.hashing.iterations),
        )?
        .set_default(
            "auth.hashing.parallelism",
            i64::from(defaults.auth.hashing.parallelism),
        )?
        .set_default(
            "directory.max_page_size",
            i64::from(defaults.directory.max_page_size),
        )?;

    let environment_overrides = config::Environment::with_prefix("ROSTER").separator("__");

    let mut config_file_attached = false;

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path.to_path_buf()));
        config_file_attached = true;
        debug!(path = %path.display(), "loading configuration from explicit path");
    } else if let Ok(path) = std::env::var("ROSTER_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ROSTER_CONFIG");
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

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.token_ttl_seconds > i64::MAX as u64 {
        config.auth.token_ttl_seconds = i64::MAX as u64;
    }

    if config.directory.max_page_size == 0 {
        anyhow::bail!("invalid configuration: directory.max_page_size must be at least 1");
    }

    if config.auth.token_secret.trim().is_empty() {
        anyhow::bail!("invalid configuration: auth.token_secret must not be empty");
    }

    if config.auth.uses_development_secret() {
        warn!("using the built-in development token secret; set ROSTER__AUTH__TOKEN_SECRET");
    }

    debug!(
        http = ?config.http,
        database = ?config.database,
        token_ttl_seconds = config.auth.token_ttl_seconds,
        max_page_size = config.directory.max_page_size,
        "loaded roster configuration"
    );
    Ok(config)
}
