//! Per-request tracing.
//!
//! Each request runs inside an `http.request` span; completion is logged at
//! `info` with the status code and latency in milliseconds.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::response::Response;

/// Runs `fut` inside a request span and logs its outcome.
pub async fn instrument<F>(method: &http::Method, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("http.request", method = %method, path = %path);
    async move {
        let started = Instant::now();
        let res = fut.await;
        info!(
            status = res.status_code().as_u16(),
            latency_ms = started.elapsed().as_secs_f64() * 1_000.0,
            "request completed"
        );
        res
    }
    .instrument(span)
    .await
}
