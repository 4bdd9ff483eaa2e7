//! # numclass
//!
//! A small HTTP service that classifies numbers: primality, perfection,
//! Armstrong-ness, parity, digit sum, and a fun fact.
//!
//! ```text
//! GET /api/classify-number?number=153
//!
//! {
//!   "number": 153,
//!   "is_prime": false,
//!   "is_perfect": false,
//!   "properties": ["armstrong", "odd"],
//!   "digit_sum": 9,
//!   "fun_fact": "153 is an Armstrong number because 1^3 + 5^3 + 3^3 = 153"
//! }
//! ```
//!
//! ## Layout
//!
//! - [`classify`]: pure numeric predicates, no I/O
//! - [`Number`]: query value parsing; fractional input is classified by its
//!   integer part, negative input is rejected
//! - [`facts`]: local fun facts, or a numbers API with a fixed fallback
//! - [`api`]: routes, validation, JSON error bodies
//! - the HTTP plumbing underneath: radix-tree [`Router`] via [`matchit`],
//!   hyper-based [`Server`] with graceful shutdown, [`middleware`] for CORS
//!   and request tracing
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use numclass::{Config, FunFacts, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), numclass::Error> {
//!     let config = Config::from_env()?;
//!     let app = api::router(FunFacts::from_config(&config)?);
//!     Server::bind(config.addr).await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod health;
mod method;
mod number;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod classify;
pub mod config;
pub mod facts;
pub mod middleware;

pub use config::Config;
pub use error::Error;
pub use facts::FunFacts;
pub use handler::Handler;
pub use method::Method;
pub use number::{Number, ParseNumberError};
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
