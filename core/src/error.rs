//! Error types for the request model.
//!
//! # Design
//! Every failure in this crate is a contract violation raised at the call
//! site. `InvalidArgument` covers rejected inputs such as an unknown method
//! token, `MissingField` covers a send attempted before the request is addressable.
//! Transport and body-decoding failures carry the underlying message as text
//! so the type stays `Clone` and FFI-friendly.

use std::fmt;

/// Errors returned by `RequestModel`, `ResponseModel`, and `transport::send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// An argument violated the operation's contract. Nothing was mutated.
    InvalidArgument(String),

    /// `send` was called before a required field was set.
    MissingField(&'static str),

    /// The transport could not complete the exchange.
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),
}

impl RequestError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RequestError::InvalidArgument(msg.into())
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            RequestError::MissingField(field) => {
                write!(f, "request is missing required field `{field}`")
            }
            RequestError::Transport(msg) => write!(f, "transport failed: {msg}"),
            RequestError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for RequestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_field() {
        let err = RequestError::MissingField("url");
        assert_eq!(err.to_string(), "request is missing required field `url`");
    }

    #[test]
    fn display_prefixes_invalid_argument() {
        let err = RequestError::invalid("unknown http method: PATCH");
        assert_eq!(err.to_string(), "invalid argument: unknown http method: PATCH");
    }
}
