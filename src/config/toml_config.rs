use crate::adapters::anthropic::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use crate::core::generator::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::{PlanError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub model: ModelConfig,
    pub validation: Option<ValidationConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub require_all_fields: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub level: Option<String>,
}

fn parse_env<T: std::str::FromStr>(name: &str, value: Option<String>) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.parse::<T>().map_err(|e| PlanError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlanError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the variable's value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlanError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an environment-like lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ANTHROPIC_API_KEY").ok_or_else(|| PlanError::MissingConfigError {
            field: "ANTHROPIC_API_KEY".to_string(),
        })?;

        Ok(Self {
            server: Some(ServerConfig {
                bind: lookup("STRATPLAN_BIND"),
                port: parse_env("STRATPLAN_PORT", lookup("STRATPLAN_PORT"))?,
            }),
            model: ModelConfig {
                api_key,
                base_url: lookup("ANTHROPIC_BASE_URL"),
                model: lookup("STRATPLAN_MODEL"),
                max_tokens: parse_env("STRATPLAN_MAX_TOKENS", lookup("STRATPLAN_MAX_TOKENS"))?,
                api_version: None,
            },
            validation: Some(ValidationConfig {
                require_all_fields: parse_env(
                    "STRATPLAN_REQUIRE_ALL_FIELDS",
                    lookup("STRATPLAN_REQUIRE_ALL_FIELDS"),
                )?,
            }),
            logging: Some(LoggingConfig {
                format: lookup("STRATPLAN_LOG_FORMAT"),
                level: None,
            }),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_secret("model.api_key", &self.model.api_key)?;
        validate_url("model.base_url", self.api_base_url())?;
        validate_non_empty_string("model.model", self.model())?;
        validate_non_empty_string("model.api_version", self.api_version())?;
        validate_range("model.max_tokens", self.max_tokens(), 1, 128_000)?;
        validate_non_empty_string("server.bind", self.bind())?;
        validate_range("server.port", self.port(), 1, u16::MAX)?;
        validate_one_of("logging.format", self.log_format(), &LOG_FORMATS)?;
        self.socket_addr()?;

        Ok(())
    }

    pub fn set_bind(&mut self, bind: String) {
        self.server.get_or_insert_with(ServerConfig::default).bind = Some(bind);
    }

    pub fn set_port(&mut self, port: u16) {
        self.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }

    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind(), self.port());
        addr.parse().map_err(|e| PlanError::InvalidConfigValueError {
            field: "server.bind".to_string(),
            value: addr.clone(),
            reason: format!("{}", e),
        })
    }

    pub fn log_format(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for AppConfig {
    fn api_key(&self) -> &str {
        &self.model.api_key
    }

    fn api_base_url(&self) -> &str {
        self.model.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn api_version(&self) -> &str {
        self.model.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    fn model(&self) -> &str {
        self.model.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn max_tokens(&self) -> u32 {
        self.model.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    fn require_all_fields(&self) -> bool {
        self.validation
            .as_ref()
            .and_then(|v| v.require_all_fields)
            .unwrap_or(false)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
