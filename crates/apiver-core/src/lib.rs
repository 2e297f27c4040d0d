//! # apiver core
//!
//! Foundational types shared by the apiver crates: the request wrapper that
//! middleware inspects and rewrites, the response type and [`IntoResponse`],
//! the structured [`ApiError`], and the middleware [`LayerStack`].
//!
//! This crate is not meant to be used directly. Use `apiver-rs` instead.

mod error;
pub mod middleware;
mod request;
mod response;

// Public API
pub use error::{ApiError, Result};
pub use middleware::{BoxedNext, LayerStack, MiddlewareLayer, NextService, ResponseFuture};
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
