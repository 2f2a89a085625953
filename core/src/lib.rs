//! Request descriptor core for an HTTP-style client.
//!
//! # Overview
//! `RequestModel` collects the method, url, headers, url data, and body of a
//! request, and later holds the `ResponseModel` that came back. The core never
//! touches the network (host-does-IO pattern): a `Transport` implementation
//! performs the exchange and `transport::send` attaches its result.
//!
//! # Design
//! - Unset fields are `None`; any string is a key, the empty one included.
//! - The response slot is crate-private and written only by `send`.
//! - Types use owned `String` / `IndexMap` fields to simplify FFI mapping.

pub mod error;
pub mod http;
pub mod request;
pub mod transport;

pub use error::RequestError;
pub use http::{Headers, HttpMethod, ResponseModel};
pub use request::RequestModel;
pub use transport::{send, Transport};
pub use url::Url;
