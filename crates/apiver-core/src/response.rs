//! Response types for apiver
//!
//! The core trait is [`IntoResponse`], which allows any type to be converted
//! into an HTTP response.
//!
//! | Type | Status | Content-Type |
//! |------|--------|--------------|
//! | `String` / `&str` | 200 | text/plain |
//! | `()` | 200 | - |
//! | [`Json<T>`] | 200 | application/json |
//! | `StatusCode` | given | - |
//! | [`ApiError`] | varies | application/json |
//!
//! Tuples `(StatusCode, R)` and `(StatusCode, HeaderMap, R)` override the
//! status and add headers.

use crate::error::{ApiError, ErrorResponse};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use http_body_util::Full;
use serde::Serialize;

/// HTTP Response type
pub type Response = http::Response<Full<Bytes>>;

/// Trait for types that can be converted into an HTTP response
pub trait IntoResponse {
    /// Convert self into a Response
    fn into_response(self) -> Response;
}

fn with_body(body: impl Into<Bytes>, content_type: Option<&'static str>) -> Response {
    let mut response = Response::new(Full::new(body.into()));
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for () {
    fn into_response(self) -> Response {
        with_body(Bytes::new(), None)
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        with_body(self, Some("text/plain; charset=utf-8"))
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        with_body(self, Some("text/plain; charset=utf-8"))
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        let mut response = with_body(Bytes::new(), None);
        *response.status_mut() = self;
        response
    }
}

impl<R: IntoResponse> IntoResponse for (StatusCode, R) {
    fn into_response(self) -> Response {
        let mut response = self.1.into_response();
        *response.status_mut() = self.0;
        response
    }
}

impl<R: IntoResponse> IntoResponse for (StatusCode, HeaderMap, R) {
    fn into_response(self) -> Response {
        let mut response = self.2.into_response();
        *response.status_mut() = self.0;
        response.headers_mut().extend(self.1);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        if let Some(internal) = &self.internal {
            tracing::debug!(
                error_type = %self.error_type,
                internal = %internal,
                "Rendering error response"
            );
        }

        let error_response = ErrorResponse::from(self);
        let body = serde_json::to_vec(&error_response).unwrap_or_else(|_| {
            br#"{"error":{"type":"internal_error","message":"Failed to serialize error"}}"#
                .to_vec()
        });

        let mut response = with_body(body, Some("application/json"));
        *response.status_mut() = status;
        response
    }
}

/// JSON response body
///
/// Serializes `T` with `serde_json`; a serialization failure turns into a
/// 500 [`ApiError`] response.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => with_body(body, Some("application/json")),
            Err(err) => ApiError::from(err).into_response(),
        }
    }
}
