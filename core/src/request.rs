//! The request descriptor.
//!
//! # Design
//! `RequestModel` is a mutable value object. Each scalar field is an
//! `Option` so "not set yet" is a checkable state rather than a sentinel.
//! Header and url-data maps only grow through the adders. Any string is a
//! valid key, including the empty one; an absent key is unrepresentable here
//! and is rejected at the C boundary instead.
//!
//! Accessors hand out shared borrows of the stored values. Callers see the
//! live state, and the borrow checker keeps them from mutating around the
//! adders.
//!
//! The response slot has no public setter. It is filled by
//! `transport::send` once a `Transport` has produced a `ResponseModel`.

use indexmap::IndexMap;
use serde::Serialize;
use url::Url;

use crate::http::{Headers, HttpMethod, ResponseModel};

/// Everything needed to issue one HTTP request, plus its eventual response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestModel {
    body: Option<String>,
    headers: Headers,
    url_data: IndexMap<String, String>,
    url: Option<Url>,
    http_method: Option<HttpMethod>,
    response: Option<ResponseModel>,
}

impl RequestModel {
    /// An empty request: no headers, no url data, every scalar field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the values stored under `key`.
    ///
    /// Repeated calls with the same key keep every value in call order.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.entry(key.into()).or_default().push(value.into());
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Empty values are stored as-is (`?flag=`).
    pub fn add_url_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.url_data.insert(key.into(), value.into());
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    pub fn set_http_method(&mut self, method: HttpMethod) {
        self.http_method = Some(method);
    }

    /// Replace the target address. Passing `None` clears it, so a caller can
    /// reset the url while assembling the request.
    pub fn set_url(&mut self, url: impl Into<Option<Url>>) {
        self.url = url.into();
    }

    pub(crate) fn set_response(&mut self, response: ResponseModel) -> &ResponseModel {
        self.response.insert(response)
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Values stored under `key`, in the order they were added.
    pub fn header_values(&self, key: &str) -> Option<&[String]> {
        self.headers.get(key).map(Vec::as_slice)
    }

    pub fn http_method(&self) -> Option<HttpMethod> {
        self.http_method
    }

    pub fn response(&self) -> Option<&ResponseModel> {
        self.response.as_ref()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn url_data(&self) -> &IndexMap<String, String> {
        &self.url_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn new_request_is_empty() {
        let req = RequestModel::new();
        assert!(req.headers().is_empty());
        assert!(req.url_data().is_empty());
        assert!(req.body().is_none());
        assert!(req.http_method().is_none());
        assert!(req.url().is_none());
        assert!(req.response().is_none());
    }

    #[test]
    fn add_header_appends_in_order() {
        let mut req = RequestModel::new();
        req.add_header("Accept", "text/json");
        req.add_header("Accept", "text/xml");
        assert_eq!(
            req.header_values("Accept").unwrap(),
            ["text/json".to_string(), "text/xml".to_string()]
        );
        assert_eq!(req.headers().len(), 1);
    }

    #[test]
    fn header_keys_are_case_sensitive() {
        let mut req = RequestModel::new();
        req.add_header("Accept", "a");
        req.add_header("accept", "b");
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn add_header_stores_empty_key() {
        let mut req = RequestModel::new();
        req.add_header("Accept", "text/json");
        req.add_header("", "v");
        req.add_header("", "w");

        assert_eq!(req.header_values("").unwrap(), ["v".to_string(), "w".to_string()]);
        assert_eq!(req.header_values("Accept").unwrap(), ["text/json".to_string()]);
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn add_header_accepts_empty_value() {
        let mut req = RequestModel::new();
        req.add_header("X-Empty", "");
        assert_eq!(req.header_values("X-Empty").unwrap(), [String::new()]);
    }

    #[test]
    fn add_url_data_overwrites() {
        let mut req = RequestModel::new();
        req.add_url_data("id", "41");
        req.add_url_data("id", "42");
        assert_eq!(req.url_data().get("id").map(String::as_str), Some("42"));
        assert_eq!(req.url_data().len(), 1);
    }

    #[test]
    fn add_url_data_stores_empty_key() {
        let mut req = RequestModel::new();
        req.add_url_data("id", "42");
        req.add_url_data("", "v");

        assert_eq!(req.url_data().len(), 2);
        assert_eq!(req.url_data()[""], "v");
        assert_eq!(req.url_data()["id"], "42");
    }

    #[test]
    fn set_url_accepts_none_and_clears() {
        let mut req = RequestModel::new();
        req.set_url(url("http://host/api"));
        assert_eq!(req.url().unwrap().as_str(), "http://host/api");

        req.set_url(None);
        assert!(req.url().is_none());
    }

    #[test]
    fn setters_replace_previous_values() {
        let mut req = RequestModel::new();
        req.set_body("first");
        req.set_body("second");
        req.set_http_method(HttpMethod::Get);
        req.set_http_method(HttpMethod::Delete);
        assert_eq!(req.body(), Some("second"));
        assert_eq!(req.http_method(), Some(HttpMethod::Delete));
    }

    #[test]
    fn set_response_replaces_previous() {
        let mut req = RequestModel::new();
        req.set_response(ResponseModel::new(500));
        req.set_response(ResponseModel::new(200));
        assert_eq!(req.response().unwrap().status, 200);
    }

    #[test]
    fn populated_request_reads_back() {
        let mut req = RequestModel::new();
        req.add_header("Accept", "text/json");
        req.add_header("Accept", "text/xml");
        req.add_url_data("id", "42");
        req.set_body("payload");
        req.set_http_method(HttpMethod::Post);
        req.set_url(url("http://host/api"));

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["headers"]["Accept"], serde_json::json!(["text/json", "text/xml"]));
        assert_eq!(json["url_data"], serde_json::json!({"id": "42"}));
        assert_eq!(json["body"], "payload");
        assert_eq!(json["http_method"], "POST");
        assert_eq!(json["url"], "http://host/api");
        assert!(json["response"].is_null());
    }
}
