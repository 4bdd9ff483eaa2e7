//! Middleware layer.
//!
//! Cross-cutting concerns applied by the [`Router`](crate::Router) around
//! every handler:
//!
//! - [`cors`]: CORS preflight answers and response headers
//! - [`trace`]: per-request span with method, path, status, latency

pub mod cors;
pub mod trace;

pub use cors::Cors;
