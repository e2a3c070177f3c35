use http::Method;

use super::{CorsConfig, CorsMiddleware, NeverSkip, Skipper};

/// Builder for creating `CorsMiddleware` with a fluent API
///
/// Starts from [`CorsConfig::default`]: any origin, the standard methods,
/// no credentials, no exposed headers, no preflight caching.
///
/// # Example
///
/// ```rust
/// use cors_filter::middleware::{skip_fn, CorsMiddlewareBuilder};
///
/// let cors = CorsMiddlewareBuilder::new()
///     .allow_origins(&["https://example.com", "https://api.example.com"])
///     .allow_headers(&["Content-Type", "Authorization"])
///     .expose_headers(&["X-Total-Count"])
///     .allow_credentials(true)
///     .max_age(3600)
///     .skipper(skip_fn(|_ctx, req: &cors_filter::handler::HandlerRequest| req.path == "/health"))
///     .build();
/// ```
pub struct CorsMiddlewareBuilder<S = NeverSkip> {
    config: CorsConfig,
    skipper: S,
}

impl CorsMiddlewareBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CorsConfig::default(),
            skipper: NeverSkip,
        }
    }

    /// Start from an existing configuration, e.g. one loaded from YAML.
    #[must_use]
    pub fn from_config(config: CorsConfig) -> Self {
        Self {
            config,
            skipper: NeverSkip,
        }
    }
}

impl Default for CorsMiddlewareBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Skipper> CorsMiddlewareBuilder<S> {
    /// Set allowed origins; an empty slice (or `"*"`) allows any origin.
    #[must_use]
    pub fn allow_origins(mut self, origins: &[&str]) -> Self {
        self.config.allow_origins = origins.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set the methods announced to preflight requests. An empty slice falls
    /// back to the standard set at build time.
    #[must_use]
    pub fn allow_methods(mut self, methods: &[Method]) -> Self {
        self.config.allow_methods = methods.to_vec();
        self
    }

    /// Set the headers announced to preflight requests.
    #[must_use]
    pub fn allow_headers(mut self, headers: &[&str]) -> Self {
        self.config.allow_headers = headers.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set headers exposed to the calling script on actual requests.
    #[must_use]
    pub fn expose_headers(mut self, headers: &[&str]) -> Self {
        self.config.expose_headers = headers.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.config.allow_credentials = allow;
        self
    }

    /// Preflight cache duration in seconds; zero or negative omits the header.
    #[must_use]
    pub fn max_age(mut self, seconds: i64) -> Self {
        self.config.max_age = seconds;
        self
    }

    /// Bypass CORS processing for requests the skipper selects.
    #[must_use]
    pub fn skipper<T: Skipper>(self, skipper: T) -> CorsMiddlewareBuilder<T> {
        CorsMiddlewareBuilder {
            config: self.config,
            skipper,
        }
    }

    #[must_use]
    pub fn build(self) -> CorsMiddleware<S> {
        CorsMiddleware::with_config(Some(self.config)).with_skipper(self.skipper)
    }
}
