//! Layer stack and the tower bridge

use crate::request::Request;
use crate::response::Response;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

/// The future every layer and handler returns
pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A boxed next function for middleware chains
pub type BoxedNext = Arc<dyn Fn(Request) -> ResponseFuture + Send + Sync>;

/// Trait for middleware that can be pushed onto a [`LayerStack`]
pub trait MiddlewareLayer: Send + Sync + 'static {
    /// Apply this middleware to a request, calling `next` to continue the chain
    fn call(&self, req: Request, next: BoxedNext) -> ResponseFuture;

    /// Clone this middleware into a boxed trait object
    fn clone_box(&self) -> Box<dyn MiddlewareLayer>;
}

impl Clone for Box<dyn MiddlewareLayer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A stack of middleware layers
#[derive(Clone, Default)]
pub struct LayerStack {
    layers: Vec<Box<dyn MiddlewareLayer>>,
}

impl LayerStack {
    /// Create a new empty layer stack
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a middleware layer to the stack
    ///
    /// Layers are executed in the order they are added (outermost first).
    pub fn push(&mut self, layer: Box<dyn MiddlewareLayer>) {
        self.layers.push(layer);
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Get the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Execute the middleware stack with a final handler
    pub fn execute(&self, req: Request, handler: BoxedNext) -> ResponseFuture {
        // Build the chain from the inside out so the first layer pushed runs first.
        let mut next = handler;

        for layer in self.layers.iter().rev() {
            let layer: Arc<dyn MiddlewareLayer> = Arc::from(layer.clone_box());
            let inner = next;
            next = Arc::new(move |req: Request| layer.call(req, Arc::clone(&inner)));
        }

        next(req)
    }
}

/// Exposes the next handler in a chain as a [`tower::Service`]
///
/// Lets tower-based code drive a handler (or a whole [`LayerStack`] wrapped in
/// a closure) without knowing about [`BoxedNext`].
#[derive(Clone)]
pub struct NextService {
    next: BoxedNext,
}

impl NextService {
    /// Wrap a handler
    pub fn new(next: BoxedNext) -> Self {
        Self { next }
    }

    /// Wrap a layer stack together with its final handler
    pub fn from_stack(stack: LayerStack, handler: BoxedNext) -> Self {
        let stack = Arc::new(stack);
        Self::new(Arc::new(move |req: Request| {
            stack.execute(req, Arc::clone(&handler))
        }))
    }
}

impl Service<Request> for NextService {
    type Response = Response;
    type Error = std::convert::Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let fut = (self.next)(req);
        Box::pin(async move { Ok(fut.await) })
    }
}
