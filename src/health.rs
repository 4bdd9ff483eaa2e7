//! Liveness check.
//!
//! `GET /` answers `400` on purpose, so orchestrators get a dedicated path:
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//!
//! There is no readiness counterpart. The only dependency, the fun fact
//! provider, degrades to a fallback and never makes the service unready.

use serde_json::json;

use crate::{IntoResponse, Json, Request, Response};

/// Always `200 OK` with `{"status":"ok"}`.
pub async fn liveness(_req: Request) -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
