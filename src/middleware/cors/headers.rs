//! Pure helpers that turn policy values into header strings.

use http::header::{HeaderValue, InvalidHeaderValue};
use http::Method;

/// Join a configured list with `,` (no spaces). Empty lists produce `None`.
#[must_use]
pub fn join_list<S: AsRef<str>>(items: &[S]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[must_use]
pub fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Pick the preflight `Access-Control-Allow-Headers` value.
///
/// The configured list wins; otherwise the request's
/// `Access-Control-Request-Headers` is echoed verbatim, byte for byte. Empty
/// values produce no header.
///
/// # Errors
///
/// Fails when the configured list is not a valid header value.
pub fn allow_headers_value(
    configured: Option<&str>,
    requested: Option<&HeaderValue>,
) -> Result<Option<HeaderValue>, InvalidHeaderValue> {
    match configured {
        Some(list) if list.is_empty() => Ok(None),
        Some(list) => HeaderValue::from_str(list).map(Some),
        None => Ok(requested.filter(|v| !v.is_empty()).cloned()),
    }
}

/// `Access-Control-Max-Age` value; non-positive ages are omitted.
#[must_use]
pub fn max_age_value(max_age: i64) -> Option<String> {
    (max_age > 0).then(|| max_age.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_keeps_order_without_spaces() {
        assert_eq!(
            join_list(&["ETag", "X-Total-Count"]).as_deref(),
            Some("ETag,X-Total-Count")
        );
        assert_eq!(join_list::<&str>(&[]), None);
    }

    #[test]
    fn joins_default_methods() {
        let methods = super::super::config::DEFAULT_ALLOW_METHODS;
        assert_eq!(join_methods(&methods), "GET,HEAD,PUT,PATCH,POST,DELETE");
    }

    #[test]
    fn configured_allow_headers_win() {
        let requested = HeaderValue::from_static("X-OriginalRequest");
        assert_eq!(
            allow_headers_value(Some("X-OrigHeader"), Some(&requested)).unwrap(),
            Some(HeaderValue::from_static("X-OrigHeader"))
        );
    }

    #[test]
    fn requested_headers_are_echoed_verbatim() {
        let requested = HeaderValue::from_static("x-a, X-B");
        assert_eq!(
            allow_headers_value(None, Some(&requested)).unwrap(),
            Some(requested)
        );
        let empty = HeaderValue::from_static("");
        assert_eq!(allow_headers_value(None, Some(&empty)).unwrap(), None);
        assert_eq!(allow_headers_value(None, None).unwrap(), None);
    }

    #[test]
    fn obs_text_request_headers_are_echoed_unchanged() {
        let requested = HeaderValue::from_bytes(b"X-Caf\xe9").unwrap();
        let echoed = allow_headers_value(None, Some(&requested)).unwrap().unwrap();
        assert_eq!(echoed.as_bytes(), b"X-Caf\xe9");
    }

    #[test]
    fn invalid_configured_allow_headers_are_rejected() {
        assert!(allow_headers_value(Some("X-A\nX-B"), None).is_err());
    }

    #[test]
    fn max_age_only_when_positive() {
        assert_eq!(max_age_value(3600).as_deref(), Some("3600"));
        assert_eq!(max_age_value(0), None);
        assert_eq!(max_age_value(-5), None);
    }
}
