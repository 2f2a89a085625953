//! The seam between a `RequestModel` and whatever performs the exchange.
//!
//! # Design
//! The core stays free of IO: a `Transport` receives a read-only request and
//! returns a `ResponseModel`. `send` is the only path that writes a response
//! into a request: attaching one always means running some `Transport`.
//! The trait stays open so hosts and tests can bring their own transport.

use crate::error::RequestError;
use crate::http::ResponseModel;
use crate::request::RequestModel;

/// Executes a request and reports what the server sent back.
///
/// Implemented for any `Fn(&RequestModel) -> Result<ResponseModel, RequestError>`,
/// which keeps test doubles to a single closure.
pub trait Transport {
    fn execute(&self, request: &RequestModel) -> Result<ResponseModel, RequestError>;
}

impl<F> Transport for F
where
    F: Fn(&RequestModel) -> Result<ResponseModel, RequestError>,
{
    fn execute(&self, request: &RequestModel) -> Result<ResponseModel, RequestError> {
        self(request)
    }
}

/// Execute `request` through `transport` and attach the response.
///
/// The request must have a url and a method; otherwise `MissingField` is
/// returned and the transport is never invoked. A transport error leaves any
/// previously attached response in place.
pub fn send<'r, T>(transport: &T, request: &'r mut RequestModel) -> Result<&'r ResponseModel, RequestError>
where
    T: Transport + ?Sized,
{
    let method = request.http_method().ok_or(RequestError::MissingField("http_method"))?;
    let url = request.url().ok_or(RequestError::MissingField("url"))?;
    tracing::debug!(%method, %url, headers = request.headers().len(), "sending request");

    let response = transport.execute(request).inspect_err(|e| {
        tracing::debug!(error = %e, "transport failed");
    })?;
    tracing::debug!(status = response.status, "response attached");

    Ok(request.set_response(response))
}
