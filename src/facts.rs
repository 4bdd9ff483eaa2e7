//! Fun-fact sources.
//!
//! The local source is deterministic. The remote source asks a numbers API
//! (`GET <base>/<n>/math`) and never fails from the caller's point of view:
//! every transport error, timeout, bad status or empty body collapses into
//! [`FALLBACK_FACT`].

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::classify;
use crate::config::{Config, FactSource};
use crate::error::Error as CrateError;

/// Substituted whenever the remote lookup does not produce a fact.
pub const FALLBACK_FACT: &str = "No fun fact available.";

/// Why a remote lookup failed. Only ever logged.
#[derive(Debug, Error)]
pub enum FactError {
    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("unreadable body: {0}")]
    Body(String),

    #[error("empty body")]
    Empty,
}

/// Where `fun_fact` comes from.
pub enum FunFacts {
    Local,
    Remote(NumbersApi),
}

impl FunFacts {
    pub fn from_config(config: &Config) -> Result<Self, CrateError> {
        match config.fact_source {
            FactSource::Local => Ok(Self::Local),
            FactSource::Remote => Ok(Self::Remote(NumbersApi::new(
                config.numbers_api_url.clone(),
                config.fact_timeout,
            )?)),
        }
    }

    /// Resolves the fun fact for the classification subject `n`.
    pub async fn fun_fact(&self, n: i64, armstrong: bool) -> String {
        match self {
            Self::Local => classify::fun_fact(n, armstrong),
            Self::Remote(api) => api.fact_or_fallback(n).await,
        }
    }
}

/// Client for a numbersapi.com-compatible service.
pub struct NumbersApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl NumbersApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CrateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CrateError::Client)?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { client, base_url, timeout })
    }

    /// One lookup, no retries.
    pub async fn fetch(&self, n: i64) -> Result<String, FactError> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        let response = self
            .client
            .get(format!("{}/{n}/math", self.base_url))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FactError::Timeout(timeout_ms)
                } else {
                    FactError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FactError::Timeout(timeout_ms)
            } else {
                FactError::Body(e.to_string())
            }
        })?;

        let fact = body.trim();
        if fact.is_empty() {
            return Err(FactError::Empty);
        }
        Ok(fact.to_owned())
    }

    /// [`fetch`](Self::fetch), with every failure replaced by [`FALLBACK_FACT`].
    pub async fn fact_or_fallback(&self, n: i64) -> String {
        match self.fetch(n).await {
            Ok(fact) => {
                debug!(number = n, "fun fact fetched");
                fact
            }
            Err(e) => {
                warn!(number = n, error = %e, "fun fact lookup failed, using fallback");
                FALLBACK_FACT.to_owned()
            }
        }
    }
}
