//! Configuration management
//!
//! This module handles loading and saving the ossctl configuration file and
//! resolving it, together with command options, into the [`Settings`] of one
//! invocation. The configuration file is stored in TOML format at
//! ~/.config/ossctl/config.toml unless `--config-file` or `OSSCTL_CONFIG_DIR`
//! points elsewhere.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::option::{OptionKey, OptionMap};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "OSSCTL_CONFIG_DIR";

/// Default region used for request signing
const DEFAULT_REGION: &str = "us-east-1";

/// Default request signature version
const DEFAULT_SIGN_VERSION: &str = "v4";

/// Default connect timeout in seconds
const DEFAULT_CONNECT_TIMEOUT: u64 = 120;

/// Default read timeout in seconds
const DEFAULT_READ_TIMEOUT: u64 = 1200;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Service endpoint and credentials
    #[serde(default)]
    pub credentials: Credentials,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Help language: "en" or "zh"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Log level used when neither RUST_LOG nor --loglevel is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Endpoint and credential section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sts_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_pwd: Option<String>,

    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            credentials: Credentials::default(),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("ossctl"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Pick the manager for an invocation: `--config-file` wins over the default location
    pub fn for_options(options: &OptionMap) -> Result<Self> {
        match options.get(&OptionKey::ConfigFile) {
            Some(path) => Ok(Self::with_path(path)),
            None => Self::new(),
        }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade ossctl.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }
}

/// Effective configuration of one invocation
///
/// Built once from the configuration file and the command options, then passed
/// explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub sts_token: Option<String>,
    pub region: String,
    pub sign_version: String,
    pub auth_mode: Option<String>,
    pub ecs_role_name: Option<String>,
    pub ram_role_arn: Option<String>,
    pub role_session_name: Option<String>,
    pub token_timeout: Option<Duration>,
    pub sts_region: Option<String>,
    pub cloudbox_id: Option<String>,
    pub proxy_host: Option<String>,
    pub proxy_user: Option<String>,
    pub proxy_pwd: Option<String>,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub skip_verify_cert: bool,
    pub user_agent: Option<String>,
    pub force_path_style: bool,
    pub language: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_key_id: None,
            access_key_secret: None,
            sts_token: None,
            region: DEFAULT_REGION.to_string(),
            sign_version: DEFAULT_SIGN_VERSION.to_string(),
            auth_mode: None,
            ecs_role_name: None,
            ram_role_arn: None,
            role_session_name: None,
            token_timeout: None,
            sts_region: None,
            cloudbox_id: None,
            proxy_host: None,
            proxy_user: None,
            proxy_pwd: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT),
            skip_verify_cert: false,
            user_agent: None,
            force_path_style: false,
            language: Locale::PRIMARY,
        }
    }
}

impl Settings {
    /// Merge options over the configuration file; options win
    pub fn resolve(options: &OptionMap, config: &Config) -> Result<Self> {
        let opt = |key: OptionKey| options.get(&key).cloned();
        let creds = &config.credentials;
        let defaults = Settings::default();

        let language = match opt(OptionKey::Language).or_else(|| config.defaults.language.clone())
        {
            Some(value) => Locale::parse(&value)
                .ok_or_else(|| Error::Config(format!("unsupported language '{value}'")))?,
            None => Locale::PRIMARY,
        };

        let force_path_style = match options.get(&OptionKey::ForcePathStyle) {
            Some(value) => parse_bool(OptionKey::ForcePathStyle, value)?,
            None => creds.force_path_style,
        };

        let skip_verify_cert = match options.get(&OptionKey::SkipVerifyCert) {
            Some(value) => parse_bool(OptionKey::SkipVerifyCert, value)?,
            None => false,
        };

        Ok(Self {
            endpoint: opt(OptionKey::Endpoint).or_else(|| creds.endpoint.clone()),
            access_key_id: opt(OptionKey::AccessKeyId).or_else(|| creds.access_key_id.clone()),
            access_key_secret: opt(OptionKey::AccessKeySecret)
                .or_else(|| creds.access_key_secret.clone()),
            sts_token: opt(OptionKey::StsToken).or_else(|| creds.sts_token.clone()),
            region: opt(OptionKey::Region)
                .or_else(|| creds.region.clone())
                .unwrap_or(defaults.region),
            sign_version: opt(OptionKey::SignVersion)
                .or_else(|| creds.sign_version.clone())
                .unwrap_or(defaults.sign_version),
            auth_mode: opt(OptionKey::Mode),
            ecs_role_name: opt(OptionKey::EcsRoleName),
            ram_role_arn: opt(OptionKey::RamRoleArn),
            role_session_name: opt(OptionKey::RoleSessionName),
            token_timeout: parse_seconds(options, OptionKey::TokenTimeout)?,
            sts_region: opt(OptionKey::StsRegion),
            cloudbox_id: opt(OptionKey::CloudBoxId),
            proxy_host: opt(OptionKey::ProxyHost).or_else(|| creds.proxy_host.clone()),
            proxy_user: opt(OptionKey::ProxyUser).or_else(|| creds.proxy_user.clone()),
            proxy_pwd: opt(OptionKey::ProxyPwd).or_else(|| creds.proxy_pwd.clone()),
            connect_timeout: parse_seconds(options, OptionKey::ConnectTimeout)?
                .unwrap_or(defaults.connect_timeout),
            read_timeout: parse_seconds(options, OptionKey::ReadTimeout)?
                .unwrap_or(defaults.read_timeout),
            skip_verify_cert,
            user_agent: opt(OptionKey::UserAgent),
            force_path_style,
            language,
        })
    }

    /// Load the configuration file named by the options and resolve it
    pub fn load(options: &OptionMap) -> Result<Self> {
        let config = ConfigManager::for_options(options)?.load()?;
        Self::resolve(options, &config)
    }

    /// First role based authentication option that was given
    pub fn role_option(&self) -> Option<OptionKey> {
        [
            (OptionKey::EcsRoleName, self.ecs_role_name.is_some()),
            (OptionKey::TokenTimeout, self.token_timeout.is_some()),
            (OptionKey::RamRoleArn, self.ram_role_arn.is_some()),
            (OptionKey::RoleSessionName, self.role_session_name.is_some()),
            (OptionKey::StsRegion, self.sts_region.is_some()),
        ]
        .into_iter()
        .find_map(|(key, given)| given.then_some(key))
    }
}

fn parse_bool(key: OptionKey, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(Error::Config(format!(
            "--{key} expects true or false, got '{value}'"
        ))),
    }
}

fn parse_seconds(options: &OptionMap, key: OptionKey) -> Result<Option<Duration>> {
    options
        .get(&key)
        .map(|value| {
            value
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| Error::Config(format!("--{key} expects seconds, got '{value}'")))
        })
        .transpose()
}
