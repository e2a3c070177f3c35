use http::header::{HeaderName, HeaderValue, InvalidHeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Response, StatusCode};
use serde::Serialize;

/// Writable response target shared by the middleware and the wrapped handler.
///
/// The status stays unset until something writes one; [`ResponseWriter::status`]
/// reports `200 OK` in that case, matching what a server would send.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get a header by name; `None` if absent or not visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Add or replace a header.
    ///
    /// # Errors
    ///
    /// Fails when `value` contains bytes that are not allowed in a header value
    /// (control characters such as `\r` or `\n`).
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), InvalidHeaderValue> {
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Add or replace a header with an already-encoded value, kept byte for byte.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Append a header value without removing existing ones (used for `Vary`).
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    /// Serialize `body` as JSON and write it with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` fails to serialize.
    pub fn write_json<T: Serialize>(&mut self, status: StatusCode, body: &T) -> anyhow::Result<()> {
        self.body = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.status = Some(status);
        Ok(())
    }

    /// Finish with `204 No Content`; any body written so far is discarded.
    pub fn no_content(&mut self) {
        self.body.clear();
        self.headers.remove(CONTENT_TYPE);
        self.status = Some(StatusCode::NO_CONTENT);
    }

    /// Convert into an [`http::Response`] for handing back to a server.
    #[must_use]
    pub fn into_response(self) -> Response<Vec<u8>> {
        let status = self.status();
        let mut res = Response::new(self.body);
        *res.status_mut() = status;
        *res.headers_mut() = self.headers;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::VARY;

    #[test]
    fn unset_status_reads_as_ok() {
        let rw = ResponseWriter::new();
        assert_eq!(rw.status(), StatusCode::OK);
        assert!(rw.body().is_empty());
    }

    #[test]
    fn rejects_header_injection() {
        let mut rw = ResponseWriter::new();
        assert!(rw.set_header(VARY, "Origin\r\nX-Evil: 1").is_err());
        assert!(rw.header("vary").is_none());
    }

    #[test]
    fn no_content_discards_body() {
        let mut rw = ResponseWriter::new();
        rw.write_json(StatusCode::OK, &serde_json::json!({"ok": true}))
            .unwrap();
        rw.no_content();
        assert_eq!(rw.status(), StatusCode::NO_CONTENT);
        assert!(rw.body().is_empty());
        assert!(rw.header("content-type").is_none());
    }

    #[test]
    fn into_response_keeps_parts() {
        let mut rw = ResponseWriter::new();
        rw.write_json(StatusCode::CREATED, &"made").unwrap();
        rw.append_header(VARY, HeaderValue::from_static("Origin"));
        let res = rw.into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()["vary"], "Origin");
        assert_eq!(res.body().as_slice(), b"\"made\"");
    }
}
