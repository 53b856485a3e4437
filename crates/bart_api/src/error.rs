//! BART API error types

use thiserror::Error;

/// Errors that can occur while talking to the BART API
#[derive(Debug, Error)]
pub enum BartError {
    /// The HTTP request could not be completed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout (configured on the HTTP executor)
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body could not be read in full
    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    /// The agency reported an error in a well-formed error envelope.
    ///
    /// The message is the agency's text, verbatim.
    #[error("{0}")]
    Remote(String),

    /// The agency reported an error with an unexpected shape
    #[error("{0}")]
    RemoteUnexpected(String),

    /// Failed to decode a JSON body into the expected response shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The body was not JSON and could not be read as an XML error either
    #[error("XML parse error: {0}")]
    XmlParseError(String),

    /// A station abbreviation was rejected before dispatch
    #[error("Invalid station abbreviation: {0:?}")]
    InvalidStation(String),

    /// A request parameter was rejected before dispatch
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl BartError {
    /// Returns true if this error came from the transport layer and a
    /// repeated call might succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::BodyRead(_)
        )
    }

    /// Returns true if the agency itself reported the error
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_) | Self::RemoteUnexpected(_))
    }
}

impl From<reqwest::Error> for BartError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::BodyRead(err.to_string())
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}
