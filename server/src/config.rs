//! Host server configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TARGET: &str = "http://127.0.0.1:8080";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid API_PROXY_TARGET `{0}`: expected an absolute http(s) URL")]
    InvalidTarget(String),
    #[error("invalid API_PROXY_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
    #[error("invalid boolean for {key}: {value}")]
    InvalidBool { key: &'static str, value: String },
}

/// Where `/api` requests are forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Backend origin, without a trailing slash.
    pub target: String,
    /// Drop the `/api` prefix before forwarding.
    pub strip_prefix: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub proxy: ProxyConfig,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_PROXY_TARGET`: backend origin, default `http://127.0.0.1:8080`
    /// - `API_PROXY_STRIP_PREFIX`: default true
    /// - `API_PROXY_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let target = parse_target(std::env::var("API_PROXY_TARGET").ok().as_deref())?;
        let strip_prefix = parse_bool("API_PROXY_STRIP_PREFIX", std::env::var("API_PROXY_STRIP_PREFIX").ok().as_deref(), true)?;
        let timeout_secs = parse_timeout(std::env::var("API_PROXY_TIMEOUT_SECS").ok().as_deref())?;

        Ok(Self { port, proxy: ProxyConfig { target, strip_prefix, timeout_secs } })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort(value.to_owned())),
    }
}

/// Whole seconds, at least one.
fn parse_timeout(raw: Option<&str>) -> Result<u64, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PROXY_TIMEOUT_SECS),
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidTimeout(value.to_owned())),
        },
    }
}

fn parse_target(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.map_or(DEFAULT_PROXY_TARGET, str::trim);
    let url = reqwest::Url::parse(raw).map_err(|_| ConfigError::InvalidTarget(raw.to_owned()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidTarget(raw.to_owned()));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_bool(key: &'static str, raw: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value: raw.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
