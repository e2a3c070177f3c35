use crate::handler::{HandlerRequest, RequestContext};

/// Decides per request whether CORS processing is bypassed entirely.
pub trait Skipper: Send + Sync {
    fn skip(&self, ctx: &RequestContext, req: &HandlerRequest) -> bool;
}

/// Never bypasses; the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverSkip;

impl Skipper for NeverSkip {
    #[inline]
    fn skip(&self, _ctx: &RequestContext, _req: &HandlerRequest) -> bool {
        false
    }
}

/// Skipper built from a closure, see [`skip_fn`].
#[derive(Clone, Copy)]
pub struct SkipFn<F> {
    f: F,
}

/// Adapt a predicate closure into a [`Skipper`].
///
/// ```rust
/// use cors_filter::middleware::{skip_fn, Skipper};
/// use cors_filter::handler::{HandlerRequest, RequestContext};
/// use http::Method;
///
/// let health = skip_fn(|_ctx, req: &HandlerRequest| req.path == "/health");
/// assert!(health.skip(&RequestContext::new(), &HandlerRequest::new(Method::GET, "/health")));
/// ```
pub fn skip_fn<F>(f: F) -> SkipFn<F>
where
    F: Fn(&RequestContext, &HandlerRequest) -> bool + Send + Sync,
{
    SkipFn { f }
}

impl<F> Skipper for SkipFn<F>
where
    F: Fn(&RequestContext, &HandlerRequest) -> bool + Send + Sync,
{
    fn skip(&self, ctx: &RequestContext, req: &HandlerRequest) -> bool {
        (self.f)(ctx, req)
    }
}
