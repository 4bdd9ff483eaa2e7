//! Unified error type.

use thiserror::Error;

use crate::config::ConfigError;

/// The error type returned by numclass's fallible startup operations.
///
/// Client mistakes (bad query values, unknown paths) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s, and a failed fun
/// fact lookup degrades to a fallback string. This type only surfaces what
/// stops the service from running: configuration, the HTTP client, and
/// binding or accepting on the listener.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("http client: {0}")]
    Client(#[source] reqwest::Error),
}
