use http::HeaderValue;

/// Literal value of a wildcard allow-origin.
pub const WILDCARD: &str = "*";

/// One entry of the origin allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRule {
    /// Any origin (`*` in configuration, or an empty allow-list)
    Any,
    /// Exact, case-sensitive origin
    Exact(String),
}

/// Ordered origin allow-list, compiled once from configuration.
///
/// Rules are tried in configuration order and the first match decides the
/// `Access-Control-Allow-Origin` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginValidation {
    rules: Vec<OriginRule>,
}

impl OriginValidation {
    /// Compile configured origins. An empty list allows any origin.
    #[must_use]
    pub fn from_origins(origins: &[String]) -> Self {
        if origins.is_empty() {
            return Self {
                rules: vec![OriginRule::Any],
            };
        }
        let rules = origins
            .iter()
            .map(|o| {
                if o == WILDCARD {
                    OriginRule::Any
                } else {
                    OriginRule::Exact(o.clone())
                }
            })
            .collect();
        Self { rules }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, OriginRule::Any))
    }

    /// Decide the allow-origin value for a request.
    ///
    /// * `origin` - the request's `Origin` header, `None` when absent
    /// * `allow_credentials` - whether the policy allows credentials
    ///
    /// A wildcard rule yields `*`, except that with credentials enabled a
    /// non-empty request origin is echoed instead. An exact rule yields the
    /// request origin. Origins are compared and echoed as raw bytes, so values
    /// outside visible ASCII match and round-trip unchanged. `None` means no
    /// header should be written.
    #[must_use]
    pub fn allowed_origin(
        &self,
        origin: Option<&HeaderValue>,
        allow_credentials: bool,
    ) -> Option<HeaderValue> {
        let requested = origin.filter(|o| !o.is_empty());
        self.rules.iter().find_map(|rule| match (rule, requested) {
            (OriginRule::Any, Some(o)) if allow_credentials => Some(o.clone()),
            (OriginRule::Any, _) => Some(HeaderValue::from_static(WILDCARD)),
            (OriginRule::Exact(allowed), Some(o)) if allowed.as_bytes() == o.as_bytes() => {
                Some(o.clone())
            }
            (OriginRule::Exact(_), _) => None,
        })
    }
}
