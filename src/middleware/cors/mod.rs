mod builder;
mod config;
pub mod headers;
mod origin;
mod skipper;

pub use builder::CorsMiddlewareBuilder;
pub use config::{CorsConfig, DEFAULT_ALLOW_METHODS};
pub use origin::{OriginRule, OriginValidation, WILDCARD};
pub use skipper::{skip_fn, NeverSkip, SkipFn, Skipper};

use std::sync::Arc;

use http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
    ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
    VARY,
};
use http::Method;
use tracing::debug;

use crate::handler::{Handler, HandlerRequest, RequestContext, ResponseWriter};
use crate::middleware::Middleware;

/// Resolved policy, with every header value that does not depend on the
/// request pre-joined at construction.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origin_validation: OriginValidation,
    allow_methods: String,
    allow_headers: Option<String>,
    expose_headers: Option<String>,
    allow_credentials: bool,
    max_age: Option<String>,
}

impl CorsPolicy {
    #[must_use]
    pub fn new(config: &CorsConfig) -> Self {
        Self {
            origin_validation: OriginValidation::from_origins(&config.allow_origins),
            allow_methods: headers::join_methods(&config.allow_methods),
            allow_headers: headers::join_list(&config.allow_headers),
            expose_headers: headers::join_list(&config.expose_headers),
            allow_credentials: config.allow_credentials,
            max_age: headers::max_age_value(config.max_age),
        }
    }

    #[must_use]
    pub fn origin_validation(&self) -> &OriginValidation {
        &self.origin_validation
    }

    /// Allow-origin value for a request, `None` if the header must not be set.
    #[must_use]
    pub fn allowed_origin(&self, req: &HandlerRequest) -> Option<HeaderValue> {
        self.origin_validation
            .allowed_origin(req.header_value(ORIGIN.as_str()), self.allow_credentials)
    }

    /// Write the headers of a non-preflight request.
    ///
    /// # Errors
    ///
    /// Fails if a configured value is not a valid header value.
    pub fn annotate(
        &self,
        rw: &mut ResponseWriter,
        allowed_origin: Option<&HeaderValue>,
    ) -> anyhow::Result<()> {
        rw.append_header(VARY, HeaderValue::from_static("Origin"));
        if let Some(origin) = allowed_origin {
            rw.insert_header(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        }
        if self.allow_credentials {
            rw.set_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true")?;
        }
        if let Some(expose) = &self.expose_headers {
            rw.set_header(ACCESS_CONTROL_EXPOSE_HEADERS, expose)?;
        }
        Ok(())
    }

    /// Write the headers of a preflight answer. The status is left to the caller.
    ///
    /// The origin and requested headers are echoed byte for byte.
    ///
    /// # Errors
    ///
    /// Fails if a configured value is not a valid header value.
    pub fn preflight(
        &self,
        rw: &mut ResponseWriter,
        allowed_origin: Option<&HeaderValue>,
        requested_headers: Option<&HeaderValue>,
    ) -> anyhow::Result<()> {
        rw.append_header(VARY, HeaderValue::from_static("Origin"));
        rw.append_header(VARY, HeaderValue::from_static("Access-Control-Request-Method"));
        rw.append_header(VARY, HeaderValue::from_static("Access-Control-Request-Headers"));
        if let Some(origin) = allowed_origin {
            rw.insert_header(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        }
        rw.set_header(ACCESS_CONTROL_ALLOW_METHODS, &self.allow_methods)?;
        if self.allow_credentials {
            rw.set_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true")?;
        }
        let allow_headers =
            headers::allow_headers_value(self.allow_headers.as_deref(), requested_headers)?;
        if let Some(allow) = allow_headers {
            rw.insert_header(ACCESS_CONTROL_ALLOW_HEADERS, allow);
        }
        if let Some(age) = &self.max_age {
            rw.set_header(ACCESS_CONTROL_MAX_AGE, age)?;
        }
        Ok(())
    }
}

/// CORS (Cross-Origin Resource Sharing) middleware
///
/// Wraps handlers in a [`CorsFilter`]. The policy is resolved once and shared
/// by every filter this value produces.
///
/// # CORS Flow
///
/// 1. **Skipped**: the [`Skipper`] said so; the handler runs untouched
/// 2. **Preflight (OPTIONS)**: headers written, `204 No Content`, handler not invoked
/// 3. **Actual request**: origin/credentials/expose headers written, then the handler runs
///
/// Origins that do not match get no `Access-Control-Allow-Origin` header; the
/// request itself is never rejected.
///
/// # Usage
///
/// ```rust
/// use cors_filter::handler::{handler_fn, Handler, HandlerRequest, RequestContext, ResponseWriter};
/// use cors_filter::middleware::{CorsConfig, CorsMiddleware, Middleware};
/// use http::{Method, StatusCode};
///
/// let cors = CorsMiddleware::with_config(Some(CorsConfig {
///     allow_origins: vec!["https://app.example.com".into()],
///     ..CorsConfig::default()
/// }));
/// let filter = cors.wrap(handler_fn(|_ctx, rw: &mut ResponseWriter, _req| {
///     rw.write_json(StatusCode::OK, &"ok")
/// }));
///
/// let req = HandlerRequest::new(Method::GET, "/")
///     .with_header(http::header::ORIGIN, "https://app.example.com".parse().unwrap());
/// let mut rw = ResponseWriter::new();
/// filter.call(&RequestContext::new(), &mut rw, &req).unwrap();
/// assert_eq!(rw.header("access-control-allow-origin"), Some("https://app.example.com"));
/// ```
#[derive(Debug)]
pub struct CorsMiddleware<S = NeverSkip> {
    policy: Arc<CorsPolicy>,
    skipper: Arc<S>,
}

impl<S> Clone for CorsMiddleware<S> {
    fn clone(&self) -> Self {
        Self {
            policy: Arc::clone(&self.policy),
            skipper: Arc::clone(&self.skipper),
        }
    }
}

impl CorsMiddleware {
    /// Middleware with the default policy: any origin, standard methods.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(None)
    }

    /// Middleware for `config`; `None` means the default policy.
    #[must_use]
    pub fn with_config(config: Option<CorsConfig>) -> Self {
        let config = CorsConfig::resolve(config);
        debug!(
            allow_origins = ?config.allow_origins,
            allow_credentials = config.allow_credentials,
            max_age = config.max_age,
            "CORS policy resolved"
        );
        Self {
            policy: Arc::new(CorsPolicy::new(&config)),
            skipper: Arc::new(NeverSkip),
        }
    }
}

impl Default for CorsMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Skipper> CorsMiddleware<S> {
    /// Replace the skip predicate.
    #[must_use]
    pub fn with_skipper<T: Skipper>(self, skipper: T) -> CorsMiddleware<T> {
        CorsMiddleware {
            policy: self.policy,
            skipper: Arc::new(skipper),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &CorsPolicy {
        &self.policy
    }

    #[must_use]
    pub fn skipper(&self) -> &S {
        &self.skipper
    }
}

impl<H: Handler, S: Skipper> Middleware<H> for CorsMiddleware<S> {
    type Wrapped = CorsFilter<H, S>;

    fn wrap(&self, inner: H) -> CorsFilter<H, S> {
        CorsFilter {
            inner,
            policy: Arc::clone(&self.policy),
            skipper: Arc::clone(&self.skipper),
        }
    }
}

/// A handler decorated with CORS policy enforcement.
pub struct CorsFilter<H, S = NeverSkip> {
    inner: H,
    policy: Arc<CorsPolicy>,
    skipper: Arc<S>,
}

impl<H: Clone, S> Clone for CorsFilter<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            policy: Arc::clone(&self.policy),
            skipper: Arc::clone(&self.skipper),
        }
    }
}

impl<H, S> CorsFilter<H, S> {
    #[must_use]
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Handler, S: Skipper> Handler for CorsFilter<H, S> {
    fn call(
        &self,
        ctx: &RequestContext,
        rw: &mut ResponseWriter,
        req: &HandlerRequest,
    ) -> anyhow::Result<()> {
        if self.skipper.skip(ctx, req) {
            debug!(request_id = %ctx.request_id, path = %req.path, "CORS: skipped");
            return self.inner.call(ctx, rw, req);
        }

        let allowed_origin = self.policy.allowed_origin(req);
        if allowed_origin.is_none() {
            debug!(
                request_id = %ctx.request_id,
                origin = ?req.header_value(ORIGIN.as_str()),
                "CORS: origin not allowed, no allow-origin header"
            );
        }

        if req.method != Method::OPTIONS {
            self.policy.annotate(rw, allowed_origin.as_ref())?;
            return self.inner.call(ctx, rw, req);
        }

        debug!(
            request_id = %ctx.request_id,
            path = %req.path,
            request_method = ?req.header_value(ACCESS_CONTROL_REQUEST_METHOD.as_str()),
            "CORS: answering preflight"
        );
        self.policy.preflight(
            rw,
            allowed_origin.as_ref(),
            req.header_value(ACCESS_CONTROL_REQUEST_HEADERS.as_str()),
        )?;
        rw.no_content();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use http::StatusCode;

    fn ok_handler() -> impl Handler {
        handler_fn(|_ctx, rw: &mut ResponseWriter, _req| rw.write_json(StatusCode::OK, &"ok"))
    }

    #[test]
    fn policy_prejoins_static_values() {
        let policy = CorsPolicy::new(&CorsConfig {
            expose_headers: vec!["ETag".into(), "X-Total-Count".into()],
            max_age: 600,
            ..CorsConfig::default()
        });
        let mut rw = ResponseWriter::new();
        let wildcard = HeaderValue::from_static("*");
        policy.annotate(&mut rw, Some(&wildcard)).unwrap();
        assert_eq!(rw.header("access-control-expose-headers"), Some("ETag,X-Total-Count"));
        assert!(rw.header("access-control-max-age").is_none());

        let mut rw = ResponseWriter::new();
        policy.preflight(&mut rw, Some(&wildcard), None).unwrap();
        assert_eq!(rw.header("access-control-max-age"), Some("600"));
        assert!(rw.header("access-control-allow-headers").is_none());
        assert!(rw.header("access-control-expose-headers").is_none());
    }

    #[test]
    fn preflight_sets_vary_for_negotiated_headers() {
        let filter = CorsMiddleware::new().wrap(ok_handler());
        let req = HandlerRequest::new(Method::OPTIONS, "/");
        let mut rw = ResponseWriter::new();
        filter.call(&RequestContext::new(), &mut rw, &req).unwrap();
        let vary: Vec<_> = rw.headers().get_all(VARY).iter().collect();
        assert_eq!(vary.len(), 3);
        assert_eq!(rw.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn obs_text_request_headers_are_echoed_byte_for_byte() {
        let filter = CorsMiddleware::new().wrap(ok_handler());
        let req = HandlerRequest::new(Method::OPTIONS, "/").with_header(
            ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_bytes(b"X-Caf\xe9").unwrap(),
        );
        let mut rw = ResponseWriter::new();
        filter.call(&RequestContext::new(), &mut rw, &req).unwrap();
        let allow = rw.headers().get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap();
        assert_eq!(allow.as_bytes(), b"X-Caf\xe9");
    }

    #[test]
    fn invalid_configured_value_is_an_error() {
        let policy = CorsPolicy::new(&CorsConfig {
            expose_headers: vec!["ETag\nX-Evil".into()],
            allow_headers: vec!["X-A\rX-B".into()],
            ..CorsConfig::default()
        });
        let mut rw = ResponseWriter::new();
        assert!(policy.annotate(&mut rw, None).is_err());
        let mut rw = ResponseWriter::new();
        assert!(policy.preflight(&mut rw, None, None).is_err());
    }

    #[test]
    fn clones_share_one_policy() {
        let cors = CorsMiddleware::new();
        let copy = cors.clone();
        assert!(std::ptr::eq(cors.policy(), copy.policy()));
    }
}
