// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub llm: Llm,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            llm: Llm::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Llm {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout: Option<String>,
    pub extra_context: Option<String>,
}

impl Default for Llm {
    fn default() -> Self {
        Self {
            base_url: Some(idealog_llm::DEFAULT_BASE_URL.to_owned()),
            model: Some(idealog_llm::DEFAULT_MODEL.to_owned()),
            api_key_env: Some(idealog_llm::DEFAULT_API_KEY_ENV.to_owned()),
            timeout: None,
            extra_context: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub enabled: Option<bool>,
    pub level: Option<String>,
    pub dir: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("IDEALOG_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set IDEALOG_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(idealog_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and put values under [storage], [llm], and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            idealog_db::validate_db_path(db_path)
                .with_context(|| format!("storage.db_path in {}", path.display()))?;
        }

        if let Some(base_url) = &self.llm.base_url
            && base_url.trim().is_empty()
        {
            bail!("llm.base_url in {} must not be empty", path.display());
        }

        if let Some(model) = &self.llm.model
            && model.trim().is_empty()
        {
            bail!("llm.model in {} must not be empty", path.display());
        }

        if let Some(key_env) = &self.llm.api_key_env
            && (key_env.trim().is_empty() || key_env.contains('='))
        {
            bail!(
                "llm.api_key_env in {} must name an environment variable, got {:?}",
                path.display(),
                key_env
            );
        }

        if let Some(timeout) = &self.llm.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "llm.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(level) = &self.logging.level {
            logging::normalize_level(level)
                .with_context(|| format!("logging.level in {}", path.display()))?;
        }

        Ok(())
    }

    /// `storage.db_path`, then `IDEALOG_DB_PATH`, then the platform data dir.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => idealog_db::default_db_path(),
        }
    }

    pub fn llm_base_url(&self) -> &str {
        self.llm
            .base_url
            .as_deref()
            .unwrap_or(idealog_llm::DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn llm_model(&self) -> &str {
        self.llm
            .model
            .as_deref()
            .unwrap_or(idealog_llm::DEFAULT_MODEL)
    }

    pub fn llm_api_key_env(&self) -> &str {
        self.llm
            .api_key_env
            .as_deref()
            .map(str::trim)
            .unwrap_or(idealog_llm::DEFAULT_API_KEY_ENV)
    }

    /// `None` leaves the HTTP client's own default in place.
    pub fn llm_timeout(&self) -> Result<Option<Duration>> {
        self.llm.timeout.as_deref().map(parse_duration).transpose()
    }

    pub fn llm_extra_context(&self) -> Option<&str> {
        self.llm
            .extra_context
            .as_deref()
            .filter(|context| !context.trim().is_empty())
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging.enabled.unwrap_or(true)
    }

    pub fn logging_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.logging.dir {
            Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir.trim())),
            _ => logging::default_log_dir(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# idealog config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is the platform data dir (for example ~/.local/share/idealog/idealog.db)\n# db_path = \"/absolute/path/to/idealog.db\"\n\n[llm]\nbase_url = \"{}\"\nmodel = \"{}\"\n# Environment variable holding the API key. A .env file in the working directory is read too.\napi_key_env = \"{}\"\n# Optional. Unset keeps the HTTP client default.\n# timeout = \"30s\"\n# Optional text appended to the assistant instructions.\n# extra_context = \"My audience is indie game developers.\"\n\n[logging]\nenabled = true\nlevel = \"{}\"\n# dir = \"/absolute/path/to/logs\"\n",
            path.display(),
            idealog_llm::DEFAULT_BASE_URL,
            idealog_llm::DEFAULT_MODEL,
            idealog_llm::DEFAULT_API_KEY_ENV,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .with_context(|| format!("timeout duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 30s)")
}
