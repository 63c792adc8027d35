use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub rest_addr: SocketAddr,
    pub rate_limit: RateLimitConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateLimitConfig {
    pub capacity: u64,
    pub refill_per_second: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rest_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)),
            rate_limit: RateLimitConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            refill_per_second: 100.0,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid {key}: {value:?}")]
    Env { key: &'static str, value: String },
    #[error("validation: {0}")]
    Validation(String),
}

pub fn load_from_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<ServerConfig, ConfigError> {
    let cfg: ServerConfig = serde_yaml::from_str(yaml)?;
    cfg.validate()?;
    Ok(cfg)
}

impl ServerConfig {
    /// Applies `ADBOARD_*` overrides. `lookup` is usually `std::env::var(..).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ADBOARD_REST_ADDR") {
            self.rest_addr = parse_env("ADBOARD_REST_ADDR", v)?;
        }
        if let Some(v) = lookup("ADBOARD_RATE_LIMIT_CAPACITY") {
            self.rate_limit.capacity = parse_env("ADBOARD_RATE_LIMIT_CAPACITY", v)?;
        }
        if let Some(v) = lookup("ADBOARD_RATE_LIMIT_REFILL_PER_SECOND") {
            self.rate_limit.refill_per_second =
                parse_env("ADBOARD_RATE_LIMIT_REFILL_PER_SECOND", v)?;
        }
        if let Some(v) = lookup("ADBOARD_LOG_FILTER") {
            self.log.filter = v;
        }
        if let Some(v) = lookup("ADBOARD_LOG_JSON") {
            self.log.json = parse_env("ADBOARD_LOG_JSON", v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit.capacity == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.capacity must be > 0".into(),
            ));
        }
        let rate = self.rate_limit.refill_per_second;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::Validation(
                "rate_limit.refill_per_second must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}
