//! Response capability contract and the standard stub response.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The capability a canned response must provide to participate in a
/// response set.
///
/// The core only ever reads the name, for exact-match lookup; everything else
/// about a response (payload, headers, how it is turned into a wire reply) is
/// opaque to the matching and selection logic.
pub trait Response: Send + Sync {
    /// Stable, developer-facing name of this response within its set,
    /// e.g. "success" or "invalid-credentials".
    fn name(&self) -> &str;
}

/// Standard stub response: a named status/headers/body triple.
///
/// This is the concrete type handed to the population closure of
/// [`ResponseSet::create_named_response`](crate::ResponseSet::create_named_response).
/// Interception layers that need richer replies can implement [`Response`]
/// on their own types instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StubResponse {
    /// Name of this response within its set
    pub name: String,

    /// HTTP status code
    #[serde(default = "default_status")]
    pub status: u16,

    /// Response headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Response body
    #[serde(default)]
    pub body: Option<StubBody>,
}

fn default_status() -> u16 {
    200
}

/// Stub response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StubBody {
    /// Plain text body
    Text { content: String },
    /// JSON body
    Json { content: serde_json::Value },
}

impl StubBody {
    /// Get the body content as bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StubBody::Text { content } => content.as_bytes().to_vec(),
            StubBody::Json { content } => content.to_string().into_bytes(),
        }
    }

    /// Default content type for this body.
    pub fn content_type(&self) -> &'static str {
        match self {
            StubBody::Text { .. } => "text/plain",
            StubBody::Json { .. } => "application/json",
        }
    }
}

impl StubResponse {
    /// Create a stub response with the given name and status, no headers and
    /// no body.
    pub fn new(name: impl Into<String>, status: u16) -> Result<Self, Error> {
        if !(100..=599).contains(&status) {
            return Err(Error::InvalidArgument(format!(
                "invalid status code: {status}"
            )));
        }
        Ok(Self {
            name: name.into(),
            status,
            headers: HashMap::new(),
            body: None,
        })
    }

    /// Create a named stub response with the default 200 status.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: 200,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Set the status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set a plain text body.
    pub fn with_body(mut self, content: impl Into<String>) -> Self {
        self.body = Some(StubBody::Text {
            content: content.into(),
        });
        self
    }

    /// Set a JSON body.
    pub fn with_json_body(mut self, content: serde_json::Value) -> Self {
        self.body = Some(StubBody::Json { content });
        self
    }

    /// Effective content type: an explicit `Content-Type` header wins,
    /// otherwise inferred from the body kind.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
            .or_else(|| self.body.as_ref().map(|b| b.content_type()))
    }
}

impl Response for StubResponse {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let response = StubResponse::named("success")
            .with_status(201)
            .with_header("X-Request-Id", "abc")
            .with_json_body(serde_json::json!({"token": "t0k3n"}));

        assert_eq!(response.name(), "success");
        assert_eq!(response.status, 201);
        assert_eq!(response.headers.get("X-Request-Id").unwrap(), "abc");
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let response = StubResponse::named("csv")
            .with_header("content-type", "text/csv")
            .with_body("a,b\n1,2");
        assert_eq!(response.content_type(), Some("text/csv"));
    }

    #[test]
    fn test_status_validation() {
        assert!(StubResponse::new("bad", 42).is_err());
        assert!(StubResponse::new("teapot", 418).is_ok());
    }

    #[test]
    fn test_body_to_bytes() {
        let text = StubBody::Text {
            content: "hello".to_string(),
        };
        assert_eq!(text.to_bytes(), b"hello");

        let json = StubBody::Json {
            content: serde_json::json!({"key": "value"}),
        };
        assert!(String::from_utf8(json.to_bytes()).unwrap().contains("key"));
    }

    #[test]
    fn test_parse_fixture() {
        let fixture = r#"
{
  "name": "locked-out",
  "status": 403,
  "body": {
    "type": "json",
    "content": { "error": "account_locked" }
  }
}
"#;
        let response: StubResponse = serde_json::from_str(fixture).unwrap();
        assert_eq!(response.name(), "locked-out");
        assert_eq!(response.status, 403);
        if let Some(StubBody::Json { content }) = &response.body {
            assert_eq!(content["error"], "account_locked");
        } else {
            panic!("Expected JSON body");
        }
    }
}
