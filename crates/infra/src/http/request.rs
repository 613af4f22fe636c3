//! Request descriptor
//!
//! A [`RequestDescriptor`] is built per call by a domain API module and
//! mutated in place by the request interceptor before transmission.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use super::errors::ApiError;

/// Body of an outgoing request
#[derive(Debug)]
pub enum RequestBody {
    /// No body (GET, DELETE).
    Empty,
    /// JSON payload sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Multipart form upload; the transport sets the boundary header.
    Multipart(Vec<FilePart>),
}

/// One file in a multipart upload
#[derive(Debug)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name reported to the backend.
    pub file_name: String,
    /// MIME type of the content.
    pub mime: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Create a file part for the given form field.
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self { field: field.into(), file_name: file_name.into(), mime: mime.into(), bytes }
    }
}

/// Descriptor for one outgoing HTTP request
///
/// Paths are relative to the client's base URL. Headers and query pairs are
/// appended by the request interceptor; a timeout override replaces the
/// client's 30-second default (uploads use 120s/180s).
#[derive(Debug)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL (e.g. `/events`).
    pub path: String,
    /// Query parameters as name/value pairs.
    pub query: Vec<(String, String)>,
    /// Extra headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
    /// Per-call timeout override.
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Create a descriptor with no query, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    /// GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// POST request with a JSON body.
    ///
    /// # Errors
    /// Returns `ApiError::Client` if the body cannot be serialized.
    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self::new(Method::POST, path).with_json(body)?)
    }

    /// PUT request with a JSON body.
    ///
    /// # Errors
    /// Returns `ApiError::Client` if the body cannot be serialized.
    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self::new(Method::PUT, path).with_json(body)?)
    }

    /// POST request carrying a multipart upload.
    pub fn post_multipart(path: impl Into<String>, parts: Vec<FilePart>) -> Self {
        let mut request = Self::new(Method::POST, path);
        request.body = RequestBody::Multipart(parts);
        request
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    /// Returns `ApiError::Client` if the body cannot be serialized.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Client(format!("failed to serialize request body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Override the client's default timeout for this call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether this request is a read (no body-mutating method)
    ///
    /// Only read requests receive the cache-defeating query parameter.
    pub fn is_read(&self) -> bool {
        matches!(self.method, Method::GET | Method::HEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_classification() {
        assert!(RequestDescriptor::get("/events").is_read());
        assert!(RequestDescriptor::new(Method::HEAD, "/events").is_read());
        assert!(!RequestDescriptor::post("/events", &serde_json::json!({})).unwrap().is_read());
        assert!(!RequestDescriptor::delete("/events/1").is_read());
    }

    #[test]
    fn test_post_serializes_body() {
        let request = RequestDescriptor::post("/events", &serde_json::json!({"title": "AGM"}))
            .unwrap();
        match request.body {
            RequestBody::Json(value) => assert_eq!(value["title"], "AGM"),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn test_timeout_override() {
        let request =
            RequestDescriptor::get("/events").with_timeout(Duration::from_secs(120));
        assert_eq!(request.timeout, Some(Duration::from_secs(120)));
    }
}
