//! Negotiation errors and their HTTP rendering

use crate::version::{ApiVersion, VersionError};
use apiver_core::ApiError;
use thiserror::Error;

/// Why negotiation rejected a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    /// The `Accept` header names the service media type with an unparsable version
    #[error("Media type {media_type} does not name a known API version")]
    UnknownMediaTypeVersion {
        /// The offending media range
        media_type: String,
    },

    /// Neither the path nor the `Accept` header carries a version
    #[error("Request does not specify an API version")]
    NoVersion,

    /// The version header value is neither `major.minor` nor `latest`
    #[error(transparent)]
    InvalidFormat(#[from] VersionError),

    /// The version header value is well formed but outside the supported range
    #[error("Version {requested} is not supported by the API. Minimum is {minimum} and maximum is {maximum}.")]
    UnsupportedVersion {
        /// Version the caller asked for
        requested: ApiVersion,
        /// Lowest supported version
        minimum: ApiVersion,
        /// Highest supported version
        maximum: ApiVersion,
    },

    /// The version segment could not be removed from the request path
    #[error("Failed to strip version segment from request path: {0}")]
    PathRewrite(String),
}

/// Rejection categories the response renderer distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// No versioned resource matches (HTTP 404)
    NotFound,
    /// Malformed version header token (HTTP 400)
    InvalidFormat,
    /// Well-formed version outside the supported range (HTTP 406)
    UnsupportedVersion,
    /// Failure inside the filter itself (HTTP 500)
    Internal,
}

impl NegotiationError {
    /// The category of this rejection
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::UnknownMediaTypeVersion { .. } | Self::NoVersion => RejectionKind::NotFound,
            Self::InvalidFormat(_) => RejectionKind::InvalidFormat,
            Self::UnsupportedVersion { .. } => RejectionKind::UnsupportedVersion,
            Self::PathRewrite(_) => RejectionKind::Internal,
        }
    }
}

impl From<NegotiationError> for ApiError {
    fn from(err: NegotiationError) -> Self {
        let message = err.to_string();
        match err.kind() {
            RejectionKind::NotFound => ApiError::not_found(message),
            RejectionKind::InvalidFormat => ApiError::bad_request(message),
            RejectionKind::UnsupportedVersion => {
                ApiError::not_acceptable("invalid_global_api_version", message)
            }
            RejectionKind::Internal => {
                ApiError::internal("API version negotiation failed").with_internal(message)
            }
        }
    }
}
