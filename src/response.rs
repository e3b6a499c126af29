//! The response value handlers produce.

use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use smallvec::SmallVec;

/// Most responses carry only a handful of headers; they stay inline below
/// this.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Header storage. Names are `Arc<str>` because the well-known ones repeat
/// across every response and clone in O(1); values are per-response data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// One response: status, headers and a JSON body.
///
/// Serializes as `{status, body}`; headers are transport detail and are
/// skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// HTTP status code.
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    /// Response headers, lowercase names.
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body; `Value::Null` for an empty body.
    pub body: Value,
}

fn serialize_status<S: serde::Serializer>(
    status: &StatusCode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the content type already set.
    #[must_use]
    pub fn json(status: StatusCode, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON error body of the shape `{"error": message}`.
    #[must_use]
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }

    /// A bodyless response.
    #[must_use]
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: Value::Null,
        }
    }

    /// A bodyless redirect to `location`.
    #[must_use]
    pub fn redirect(status: StatusCode, location: &str) -> Self {
        let mut response = Self::empty(status);
        response.set_header("location", location);
        response
    }

    /// Header lookup, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set or replace a header.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value,
            None => self
                .headers
                .push((Arc::from(name.to_ascii_lowercase()), value)),
        }
    }
}
