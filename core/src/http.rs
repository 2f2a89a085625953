//! HTTP vocabulary shared by requests and responses.
//!
//! # Design
//! These types describe the wire-level pieces as plain data. The core never
//! performs IO; a `Transport` produces a `ResponseModel` and the caller reads
//! it back through `RequestModel::response`.
//!
//! Header maps are `IndexMap<String, Vec<String>>` so repeated headers keep
//! their values in arrival order and iteration order is deterministic.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Multi-valued header map: name to values in insertion order.
pub type Headers = IndexMap<String, Vec<String>>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// The upper-case token sent on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RequestError;

    /// Method tokens are case-sensitive, so `"get"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(RequestError::invalid(format!("unknown http method: {other}"))),
        }
    }
}

/// A server response described as plain data.
///
/// Produced by a `Transport` and attached to the originating `RequestModel`
/// by `transport::send`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseModel {
    pub status: u16,
    pub status_message: String,
    pub headers: Headers,
    pub body: String,
}

impl ResponseModel {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of the named header. Names compare ASCII case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        serde_json::from_str(&self.body).map_err(|e| RequestError::DeserializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_wire_tokens() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn method_parse_is_case_sensitive() {
        let err = "post".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, RequestError::InvalidArgument(_)));
    }

    #[test]
    fn method_serializes_as_upper_case_token() {
        let json = serde_json::to_string(&HttpMethod::Put).unwrap();
        assert_eq!(json, r#""PUT""#);
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let mut response = ResponseModel::new(200);
        response
            .headers
            .insert("Content-Type".to_string(), vec!["text/plain".to_string(), "ignored".to_string()]);
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn response_success_range() {
        assert!(ResponseModel::new(204).is_success());
        assert!(!ResponseModel::new(302).is_success());
        assert!(!ResponseModel::new(500).is_success());
    }

    #[test]
    fn response_json_bad_body() {
        let response = ResponseModel {
            body: "not json".to_string(),
            ..ResponseModel::new(200)
        };
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, RequestError::DeserializationError(_)));
    }
}
