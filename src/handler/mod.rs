//! Handler abstraction the CORS filter decorates.
//!
//! A handler receives a [`RequestContext`], a mutable [`ResponseWriter`] and the
//! [`HandlerRequest`], and either completes or returns an error. Middleware
//! wraps one handler and yields another with the same shape.

mod request;
mod response;

pub use request::HandlerRequest;
pub use response::ResponseWriter;

use crate::ids::RequestId;

/// Per-request context handed to skip predicates and handlers.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Correlation id for log lines emitted while handling this request
    pub request_id: RequestId,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context for `req`, reusing its `X-Request-Id` header when it is a ULID.
    #[must_use]
    pub fn for_request(req: &HandlerRequest) -> Self {
        Self {
            request_id: RequestId::from_header_or_new(req.get_header("x-request-id")),
        }
    }
}

/// A request handler.
///
/// Errors are returned to whoever invoked the handler; middleware passes them
/// through unchanged.
pub trait Handler: Send + Sync {
    fn call(
        &self,
        ctx: &RequestContext,
        rw: &mut ResponseWriter,
        req: &HandlerRequest,
    ) -> anyhow::Result<()>;
}

/// Handler built from a closure, see [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Adapt a closure into a [`Handler`].
///
/// ```rust
/// use cors_filter::handler::{handler_fn, Handler, HandlerRequest, RequestContext, ResponseWriter};
/// use http::{Method, StatusCode};
///
/// let ok = handler_fn(|_ctx, rw: &mut ResponseWriter, _req| {
///     rw.write_json(StatusCode::OK, &"ok")
/// });
/// let mut rw = ResponseWriter::new();
/// ok.call(&RequestContext::new(), &mut rw, &HandlerRequest::new(Method::GET, "/"))
///     .unwrap();
/// assert_eq!(rw.status(), StatusCode::OK);
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&RequestContext, &mut ResponseWriter, &HandlerRequest) -> anyhow::Result<()>
        + Send
        + Sync,
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&RequestContext, &mut ResponseWriter, &HandlerRequest) -> anyhow::Result<()>
        + Send
        + Sync,
{
    fn call(
        &self,
        ctx: &RequestContext,
        rw: &mut ResponseWriter,
        req: &HandlerRequest,
    ) -> anyhow::Result<()> {
        (self.f)(ctx, rw, req)
    }
}

impl<H: Handler + ?Sized> Handler for std::sync::Arc<H> {
    fn call(
        &self,
        ctx: &RequestContext,
        rw: &mut ResponseWriter,
        req: &HandlerRequest,
    ) -> anyhow::Result<()> {
        (**self).call(ctx, rw, req)
    }
}
