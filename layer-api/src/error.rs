//! Unified error types for the Layer API client.

use crate::types::Body;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the Layer API client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client could not be constructed from the given settings.
    #[error("configuration: {0}")]
    Configuration(String),

    /// An argument passed to a resource method was invalid. Nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-success status.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The exchange could not be completed (connect failure, reset, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// HTTP status of a [`Response`](Self::Response) error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.status),
            _ => None,
        }
    }

    /// Whether this error is a request timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.timed_out)
    }

    pub(crate) fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_owned())
    }
}

/// The remote service rejected the request (status `>= 300`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("response error: HTTP {status}")]
pub struct ResponseError {
    /// HTTP status code.
    pub status: u16,
    /// Response payload, parsed as JSON when possible.
    pub body: Body,
}

/// The request/response exchange could not be completed.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
    #[source]
    source: Option<reqwest::Error>,
    partial: Option<String>,
}

impl TransportError {
    pub(crate) fn new(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: Some(source),
            partial: None,
        }
    }

    pub(crate) fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
            source: None,
            partial: None,
        }
    }

    /// The request could not be put on the wire (e.g. an unencodable header).
    pub(crate) fn unsendable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: None,
            partial: None,
        }
    }

    /// Attach text received before the failure. Empty text is dropped.
    pub(crate) fn with_partial(mut self, partial: String) -> Self {
        if !partial.is_empty() {
            self.partial = Some(partial);
        }
        self
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the configured timeout elapsed before the exchange completed.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        self.timed_out
    }

    /// Underlying HTTP client error, if any.
    #[must_use]
    pub const fn cause(&self) -> Option<&reqwest::Error> {
        self.source.as_ref()
    }

    /// Response text received before the failure, if any.
    #[must_use]
    pub fn partial_response(&self) -> Option<&str> {
        self.partial.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_classified_as_transport() {
        let err = Error::from(TransportError::timeout("request timeout after 0.05 seconds"));
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "request timeout after 0.05 seconds");
    }

    #[test]
    fn response_error_carries_status() {
        let err = Error::from(ResponseError {
            status: 404,
            body: Body::Text("missing".into()),
        });
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "response error: HTTP 404");
    }

    #[test]
    fn empty_partial_is_dropped() {
        let err = TransportError::timeout("t").with_partial(String::new());
        assert!(err.partial_response().is_none());
        let err = TransportError::timeout("t").with_partial("{\"id\":".into());
        assert_eq!(err.partial_response(), Some("{\"id\":"));
    }
}
