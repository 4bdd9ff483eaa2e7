//! Handler trait and type erasure.
//!
//! # Storing handlers of different types
//!
//! Every `async fn` has its own anonymous future type, so `classify_number`,
//! `liveness` and `not_found` are three unrelated types. The router keeps them
//! all in one `HashMap<Method, MatchitRouter<_>>`, which needs a single value
//! type. Each handler is therefore wrapped once, at registration, and stored
//! behind the [`ErasedHandler`] trait object:
//!
//! ```text
//! async fn root(req: Request) -> Response { … }   the route's handler
//!        ↓ router.on(Method::Get, "/", root)
//! root.into_boxed_handler()                       Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(root))                       typed wrapper on the heap
//!        ↓ stored as BoxedHandler
//! handler.call(req)                               vtable dispatch per request
//!        ↓
//! Box::pin(async { root(req).await.into_response() })
//! ```
//!
//! Per request that is one `Arc` clone out of the tree, one dynamic call and
//! one boxed future. The classifier's own work dwarfs all three.
//!
//! # Shared state
//!
//! Handlers that need shared state are closures over an `Arc`. The closure is
//! `Fn`, so it clones the `Arc` into each future it returns:
//!
//! ```rust
//! use std::sync::Arc;
//! use numclass::{Json, Method, Request, Router};
//!
//! let greeting = Arc::new(String::from("hi"));
//! let router = Router::new().on(Method::Get, "/", move |_req: Request| {
//!     let greeting = Arc::clone(&greeting);
//!     async move { Json(greeting.to_string()) }
//! });
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// Pinned because the runtime polls it in place after the first poll. `Send`
/// lets a multi-threaded runtime resume it on any worker.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)`: it is named in the return
/// type of [`Handler::into_boxed_handler`], which is public.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared by every connection task.
///
/// Lookups hand out clones of the `Arc`, so a handler is never copied and a
/// request in flight keeps its handler alive on its own.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Never implemented by hand. Any function or closure of this shape
/// qualifies:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// Sealed through the private `Sealed` supertrait, so the blanket impl below
/// is the only implementation.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// `Sealed` is unnameable outside this module.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

/// Seals every `Fn(Request) -> impl Future<Output: IntoResponse>`: named
/// `async fn` items and closures returning `async` blocks alike.
impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds the concrete handler `F` and implements [`ErasedHandler`] for it.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // The handler's own return type only exists inside this impl, so the
        // IntoResponse conversion happens here, inside the boxed future.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
