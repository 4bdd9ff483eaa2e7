//! Process configuration, read once from the environment at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `FUN_FACT_SOURCE` | `local` (`local` or `remote`) |
//! | `NUMBERS_API_URL` | `http://numbersapi.com` |
//! | `FUN_FACT_TIMEOUT_MS` | `2000` |

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_NUMBERS_API_URL: &str = "http://numbersapi.com";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not valid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Which [`FunFacts`](crate::facts::FunFacts) the service uses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FactSource {
    Local,
    Remote,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub fact_source: FactSource,
    pub numbers_api_url: String,
    pub fact_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            fact_source: FactSource::Local,
            numbers_api_url: DEFAULT_NUMBERS_API_URL.to_owned(),
            fact_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable lookup. Unset and blank variables
    /// take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let host = match get("HOST") {
            Some(v) => v.parse::<IpAddr>().map_err(|_| invalid("HOST", v, "expected an IP address"))?,
            None => defaults.addr.ip(),
        };
        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| invalid("PORT", v, "expected a port number"))?,
            None => defaults.addr.port(),
        };
        let fact_source = match get("FUN_FACT_SOURCE") {
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "local" => FactSource::Local,
                "remote" => FactSource::Remote,
                _ => return Err(invalid("FUN_FACT_SOURCE", v, "expected `local` or `remote`")),
            },
            None => defaults.fact_source,
        };
        let numbers_api_url = match get("NUMBERS_API_URL") {
            Some(v) => {
                let parsed = url::Url::parse(&v)
                    .map_err(|_| invalid("NUMBERS_API_URL", v.clone(), "expected an absolute URL"))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(invalid("NUMBERS_API_URL", v, "expected an http(s) URL"));
                }
                v
            }
            None => defaults.numbers_api_url,
        };
        let fact_timeout = match get("FUN_FACT_TIMEOUT_MS") {
            Some(v) => match v.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => return Err(invalid("FUN_FACT_TIMEOUT_MS", v, "expected a positive integer")),
            },
            None => defaults.fact_timeout,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            fact_source,
            numbers_api_url,
            fact_timeout,
        })
    }
}

fn invalid(var: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { var, value, reason }
}
