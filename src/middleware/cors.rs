//! Cross-origin resource sharing.
//!
//! [`Cors::permissive`] allows every origin, method and header, with
//! credentials. Browsers refuse a literal `*` origin on credentialed requests,
//! so the request's `Origin` is echoed back (with `vary: origin`) whenever one
//! is present; `*` is only sent to clients that did not name an origin.

use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS,
    ACCESS_CONTROL_REQUEST_METHOD, HeaderMap, HeaderValue, ORIGIN, VARY,
};

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// A CORS policy, built once at startup.
#[derive(Clone, Debug)]
pub struct Cors {
    allow_credentials: bool,
    max_age_secs: u32,
}

impl Cors {
    /// Any origin, any method, any header, credentials allowed.
    pub fn permissive() -> Self {
        Self { allow_credentials: true, max_age_secs: 600 }
    }

    /// `OPTIONS` carrying both `Origin` and `Access-Control-Request-Method`.
    pub(crate) fn is_preflight(&self, req: &Request) -> bool {
        req.method() == http::Method::OPTIONS
            && req.head.headers.contains_key(ORIGIN)
            && req.head.headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
    }

    /// Answers a preflight without consulting the route table.
    pub(crate) fn preflight(&self, req: &Request) -> Response {
        let headers = &req.head.headers;
        let mut res = Response::status(Status::NoContent);
        self.apply(headers.get(ORIGIN), &mut res);

        let out = res.headers_mut();
        let methods = headers
            .get(ACCESS_CONTROL_REQUEST_METHOD)
            .cloned()
            .unwrap_or_else(all_methods);
        out.insert(ACCESS_CONTROL_ALLOW_METHODS, methods);

        let allow_headers = headers
            .get(ACCESS_CONTROL_REQUEST_HEADERS)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("*"));
        out.insert(ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
        out.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from(self.max_age_secs));
        out.append(VARY, HeaderValue::from_static("access-control-request-method"));
        out.append(VARY, HeaderValue::from_static("access-control-request-headers"));
        res
    }

    /// Adds the origin and credentials headers to any response.
    pub(crate) fn apply(&self, origin: Option<&HeaderValue>, res: &mut Response) {
        let out: &mut HeaderMap = res.headers_mut();
        match origin {
            Some(origin) => {
                out.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
                out.append(VARY, HeaderValue::from_static("origin"));
            }
            None => {
                out.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
            }
        }
        if self.allow_credentials {
            out.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
        }
    }
}

fn all_methods() -> HeaderValue {
    let list = Method::ALL.map(Method::as_str).join(", ");
    HeaderValue::from_str(&list).unwrap_or_else(|_| HeaderValue::from_static("GET"))
}
