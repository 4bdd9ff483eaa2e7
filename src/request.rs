//! Incoming HTTP request type.

use http::request::Parts;

/// An incoming HTTP request, as seen by a handler.
///
/// Holds the request head only. Every route the service exposes is a `GET`,
/// so bodies are never read.
pub struct Request {
    pub(crate) head: Parts,
}

impl Request {
    pub(crate) fn new(head: Parts) -> Self {
        Self { head }
    }

    pub fn method(&self) -> &http::Method { &self.head.method }
    pub fn path(&self) -> &str { self.head.uri.path() }

    /// Returns the first value of a query-string parameter, percent-decoded.
    ///
    /// `?number=1%2B1` yields `Some("1+1")`; `?number=` yields `Some("")`.
    pub fn query(&self, key: &str) -> Option<String> {
        let query = self.head.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}
