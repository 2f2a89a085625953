use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// What the server saw, sent back as the JSON body of every echo reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub request_id: Uuid,
    pub method: String,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", any(status))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(
    method: Method,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, %method, path = uri.path(), "echo");

    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        if let Ok(value) = value.to_str() {
            grouped.entry(name.as_str().to_string()).or_default().push(value.to_string());
        }
    }

    let echo = Echo {
        request_id,
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers: grouped,
        body,
    };
    with_request_id(request_id, Json(echo))
}

async fn status(Path(code): Path<u16>) -> Result<Response, StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, status = code, "status");
    Ok(with_request_id(request_id, status))
}

fn with_request_id(request_id: Uuid, reply: impl IntoResponse) -> Response {
    let mut response = reply.into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_serializes_to_json() {
        let mut headers = BTreeMap::new();
        headers.insert("accept".to_string(), vec!["text/json".to_string(), "text/xml".to_string()]);
        let echo = Echo {
            request_id: Uuid::nil(),
            method: "POST".to_string(),
            path: "/api".to_string(),
            query: BTreeMap::from([("id".to_string(), "42".to_string())]),
            headers,
            body: "payload".to_string(),
        };
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["request_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["method"], "POST");
        assert_eq!(json["query"]["id"], "42");
        assert_eq!(json["headers"]["accept"][1], "text/xml");
        assert_eq!(json["body"], "payload");
    }

    #[test]
    fn echo_rejects_missing_fields() {
        let result: Result<Echo, _> = serde_json::from_str(r#"{"method":"GET"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn request_id_header_is_attached() {
        let response = with_request_id(Uuid::nil(), StatusCode::OK);
        assert_eq!(
            response.headers()[REQUEST_ID_HEADER],
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
