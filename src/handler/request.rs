use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};

/// Read-only view of an inbound request as seen by handlers and middleware.
///
/// Header lookups go through [`HeaderMap`], so names are case-insensitive and
/// values are returned exactly as received.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// HTTP method (GET, OPTIONS, etc.)
    pub method: Method,
    /// Request path including any query string
    pub path: String,
    /// HTTP headers
    pub headers: HeaderMap,
}

impl HandlerRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Builder-style header insertion; replaces any previous value for `name`.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Raw header value by name, whatever bytes it carries.
    #[inline]
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// Get a header value by name as text.
    ///
    /// Returns `None` when the header is absent or not visible ASCII; use
    /// [`HandlerRequest::header_value`] when the exact bytes matter. A header
    /// that is present but empty yields `Some("")`.
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl<B> From<&http::Request<B>> for HandlerRequest {
    fn from(req: &http::Request<B>) -> Self {
        let path = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.uri().path().to_string(), |pq| pq.as_str().to_string());
        Self {
            method: req.method().clone(),
            path,
            headers: req.headers().clone(),
        }
    }
}
