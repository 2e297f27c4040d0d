//! Middleware infrastructure for apiver
//!
//! Middleware is anything implementing [`MiddlewareLayer`]. Layers are kept in
//! a [`LayerStack`] and run outermost first; each one either calls `next` to
//! continue or returns a response of its own to short-circuit the chain.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver_core::middleware::LayerStack;
//! use apiver_versioning::VersionNegotiationLayer;
//!
//! let mut stack = LayerStack::new();
//! stack.push(Box::new(VersionNegotiationLayer::new(config, registry)?));
//! let response = stack.execute(request, handler).await;
//! ```

mod layer;

pub use layer::{BoxedNext, LayerStack, MiddlewareLayer, NextService, ResponseFuture};
