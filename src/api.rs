//! HTTP surface of the classifier.
//!
//! | Method | Path | Answer |
//! |---|---|---|
//! | `GET` | `/api/classify-number?number=<n>` | `200` classification, `400` on bad input |
//! | `GET` | `/` | `400` pointing at the classification path |
//! | `GET` | `/healthz` | `200` liveness |
//!
//! Every error body is JSON with `"error": true` and a `"message"`.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::classify::{self, Classification};
use crate::facts::FunFacts;
use crate::health;
use crate::method::Method;
use crate::middleware::Cors;
use crate::number::{Number, ParseNumberError};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;

pub const CLASSIFY_PATH: &str = "/api/classify-number";

const ROOT_MESSAGE: &str = "Use /api/classify-number?number=<n> to classify a number.";

/// The full route table, with permissive CORS on every route.
pub fn router(facts: FunFacts) -> Router {
    let facts = Arc::new(facts);
    Router::new()
        .on(Method::Get, "/", root)
        .on(Method::Get, CLASSIFY_PATH, move |req: Request| {
            classify_number(Arc::clone(&facts), req)
        })
        .on(Method::Get, "/healthz", health::liveness)
        .fallback(not_found)
        .cors(Cors::permissive())
}

async fn classify_number(facts: Arc<FunFacts>, req: Request) -> Response {
    let number = match validate(req.query("number")) {
        Ok(number) => number,
        Err(e) => {
            debug!(reason = ?e, "rejected classification input");
            return e.into_response();
        }
    };

    let subject = number.subject();
    let fun_fact = facts.fun_fact(subject, classify::is_armstrong(subject)).await;

    // Trial division on a large subject takes seconds; keep it off the async workers.
    match tokio::task::spawn_blocking(move || Classification::new(number, fun_fact)).await {
        Ok(classification) => Json(classification).into_response(),
        Err(e) => {
            error!(error = %e, number = subject, "classification task failed");
            error_response(Status::InternalServerError, None, "Classification failed")
        }
    }
}

async fn root(_req: Request) -> Response {
    error_response(Status::BadRequest, None, ROOT_MESSAGE)
}

async fn not_found(_req: Request) -> Response {
    error_response(Status::NotFound, None, "Not found")
}

// ── Input validation ──────────────────────────────────────────────────────────

/// Why the `number` query parameter was rejected. Each variant is a `400`
/// whose body message is the `Display` text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Absent or empty.
    #[error("Invalid input. Please provide a valid number.")]
    Missing,
    #[error("Invalid number format")]
    Malformed(String),
    #[error("Number is out of the supported range")]
    OutOfRange(String),
    #[error("Negative numbers are not supported")]
    Negative(String),
}

impl InputError {
    fn raw(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::Malformed(raw) | Self::OutOfRange(raw) | Self::Negative(raw) => Some(raw),
        }
    }
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        error_response(Status::BadRequest, self.raw(), &self.to_string())
    }
}

/// Parses the raw `number` parameter into the value to classify.
pub fn validate(raw: Option<String>) -> Result<Number, InputError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(InputError::Missing),
    };
    let number = match Number::parse(&raw) {
        Ok(number) => number,
        Err(ParseNumberError::Malformed) => return Err(InputError::Malformed(raw)),
        Err(ParseNumberError::OutOfRange) => return Err(InputError::OutOfRange(raw)),
    };
    if number.is_negative() {
        return Err(InputError::Negative(raw));
    }
    Ok(number)
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<&'a str>,
    error: bool,
    message: &'a str,
}

fn error_response(status: Status, number: Option<&str>, message: &str) -> Response {
    (status, Json(ErrorBody { number, error: true, message })).into_response()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::facts::FALLBACK_FACT;

    async fn get(router: &Router, uri: &str) -> (http::StatusCode, Value) {
        let res = router.handle(http::Request::get(uri).body(()).unwrap()).await;
        let body = serde_json::from_slice(res.body()).unwrap();
        (res.status_code(), body)
    }

    #[rstest]
    #[case(None, InputError::Missing)]
    #[case(Some(""), InputError::Missing)]
    #[case(Some("  "), InputError::Missing)]
    #[case(Some("abc"), InputError::Malformed("abc".into()))]
    #[case(Some("1e400"), InputError::Malformed("1e400".into()))]
    #[case(Some("99999999999999999999"), InputError::OutOfRange("99999999999999999999".into()))]
    #[case(Some("-5"), InputError::Negative("-5".into()))]
    #[case(Some("-0.5"), InputError::Negative("-0.5".into()))]
    fn validation_rejects(#[case] raw: Option<&str>, #[case] expected: InputError) {
        assert_eq!(validate(raw.map(str::to_owned)), Err(expected));
    }

    #[rstest]
    #[case("0", Number::Integer(0))]
    #[case("-0", Number::Integer(0))]
    #[case("28", Number::Integer(28))]
    #[case("28.0", Number::Integer(28))]
    #[case("4.2", Number::Decimal(4.2))]
    fn validation_accepts(#[case] raw: &str, #[case] expected: Number) {
        assert_eq!(validate(Some(raw.to_owned())), Ok(expected));
    }

    #[tokio::test]
    async fn classifies_153() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/api/classify-number?number=153").await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "number": 153,
                "is_prime": false,
                "is_perfect": false,
                "properties": ["armstrong", "odd"],
                "digit_sum": 9,
                "fun_fact": "153 is an Armstrong number because 1^3 + 5^3 + 3^3 = 153",
            })
        );
    }

    #[tokio::test]
    async fn classifies_perfect_even_number() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/api/classify-number?number=28").await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body["is_perfect"], true);
        assert_eq!(body["is_prime"], false);
        assert_eq!(body["properties"], json!(["even"]));
        assert_eq!(body["digit_sum"], 10);
        assert_eq!(body["fun_fact"], "28 is not an Armstrong number.");
    }

    #[tokio::test]
    async fn whole_decimal_is_reported_as_integer() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/api/classify-number?number=7.0").await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body["number"], json!(7));
        assert!(body["number"].is_i64());
        assert_eq!(body["is_prime"], true);
    }

    #[tokio::test]
    async fn fractional_input_classifies_integer_part() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/api/classify-number?number=13.75").await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body["number"], json!(13.75));
        assert_eq!(body["is_prime"], true);
        assert_eq!(body["digit_sum"], 4);
        assert_eq!(body["fun_fact"], "13 is not an Armstrong number.");
    }

    #[tokio::test]
    async fn malformed_number_is_400_with_raw_input() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/api/classify-number?number=abc").await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "number": "abc", "error": true, "message": "Invalid number format" })
        );
    }

    #[tokio::test]
    async fn missing_number_is_uniform_400() {
        let router = router(FunFacts::Local);
        for uri in ["/api/classify-number", "/api/classify-number?number=", "/api/classify-number?n=5"] {
            let (status, body) = get(&router, uri).await;
            assert_eq!(status, http::StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                body,
                json!({ "error": true, "message": "Invalid input. Please provide a valid number." }),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn negative_number_is_400() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/api/classify-number?number=-7").await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
        assert_eq!(body["number"], "-7");
        assert_eq!(body["message"], "Negative numbers are not supported");
    }

    #[tokio::test]
    async fn root_points_at_classification_path() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/").await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], ROOT_MESSAGE);
        assert!(body.get("number").is_none());
    }

    #[tokio::test]
    async fn unknown_path_is_json_404() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/api/other").await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": true, "message": "Not found" }));
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let router = router(FunFacts::Local);
        let (status, body) = get(&router, "/healthz").await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn responses_carry_cors_headers() {
        let router = router(FunFacts::Local);
        let req = http::Request::get("/api/classify-number?number=abc")
            .header("origin", "https://frontend.example")
            .body(())
            .unwrap();
        let res = router.handle(req).await;

        assert_eq!(res.status_code(), http::StatusCode::BAD_REQUEST);
        assert_eq!(res.header("access-control-allow-origin"), Some("https://frontend.example"));
        assert_eq!(res.header("access-control-allow-credentials"), Some("true"));
    }

    #[tokio::test]
    async fn unreachable_fact_provider_still_classifies() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let api = crate::facts::NumbersApi::new(
            format!("http://{addr}"),
            std::time::Duration::from_millis(200),
        )
        .unwrap();
        let router = router(FunFacts::Remote(api));
        let (status, body) = get(&router, "/api/classify-number?number=6").await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body["is_perfect"], true);
        assert_eq!(body["fun_fact"], FALLBACK_FACT);
    }

    #[rstest]
    #[case(InputError::Missing, "Invalid input. Please provide a valid number.")]
    #[case(InputError::Malformed("x".into()), "Invalid number format")]
    #[case(InputError::OutOfRange("1e30".into()), "Number is out of the supported range")]
    #[case(InputError::Negative("-1".into()), "Negative numbers are not supported")]
    fn input_error_display_is_the_body_message(#[case] e: InputError, #[case] message: &str) {
        assert_eq!(e.to_string(), message);

        let res = e.into_response();
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], message);
    }

    #[test]
    fn large_input_does_not_hold_the_runtime() {
        // One worker thread: if the classification ran inline, nothing else could.
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let elapsed = rt.block_on(async {
            let router = Arc::new(router(FunFacts::Local));
            let slow = Arc::clone(&router);
            let _pending = tokio::spawn(async move {
                get(&slow, "/api/classify-number?number=9223372036854775807").await
            });

            let started = std::time::Instant::now();
            tokio::task::yield_now().await;
            let (status, _) = get(&router, "/healthz").await;
            assert_eq!(status, http::StatusCode::OK);
            started.elapsed()
        });
        // Leave the trial division running on its blocking thread.
        rt.shutdown_background();

        assert!(elapsed < std::time::Duration::from_secs(1), "healthz took {elapsed:?}");
    }
}
