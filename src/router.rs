//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. The router
//! also owns the request pipeline around a handler: CORS preflight, `405` for
//! known paths hit with the wrong method, the fallback for unknown paths, and
//! the per-request trace span.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use serde_json::json;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Cors, trace};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// It is never mutated afterwards.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
    cors: Option<Cors>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None, cors: None }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or was already registered for
    /// `method`; both are programming errors caught at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Handler for paths no route matches. Defaults to a bare `404`.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    /// Applies `cors` to every response and answers preflights with it.
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Runs one request through the pipeline. The body is ignored.
    pub async fn handle<B>(&self, req: http::Request<B>) -> Response {
        let (head, _) = req.into_parts();
        let method = head.method.clone();
        let path = head.uri.path().to_owned();
        trace::instrument(&method, &path, self.respond(Request::new(head))).await
    }

    async fn respond(&self, req: Request) -> Response {
        let origin = req.head.headers.get(http::header::ORIGIN).cloned();

        let mut res = match &self.cors {
            Some(cors) if cors.is_preflight(&req) => return cors.preflight(&req),
            _ => self.route(req).await,
        };

        if let Some(cors) = &self.cors {
            cors.apply(origin.as_ref(), &mut res);
        }
        res
    }

    async fn route(&self, req: Request) -> Response {
        let method = Method::try_from(req.method()).ok();
        if let Some(handler) = method.and_then(|m| self.lookup(m, req.path())) {
            return handler.call(req).await;
        }

        let allowed = self.allowed_methods(req.path());
        if !allowed.is_empty() {
            let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
            return Response::builder()
                .status(Status::MethodNotAllowed)
                .header("allow", &allow)
                .json(&json!({ "error": true, "message": "Method not allowed" }));
        }

        match &self.fallback {
            Some(handler) => handler.call(req).await,
            None => Response::status(Status::NotFound),
        }
    }

    fn lookup(&self, method: Method, path: &str) -> Option<BoxedHandler> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }

    /// Methods with a route matching `path`, in [`Method::ALL`] order.
    fn allowed_methods(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.routes.get(m).is_some_and(|tree| tree.at(path).is_ok()))
            .collect()
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
