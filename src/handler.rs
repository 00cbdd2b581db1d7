//! Handler capability and invocation.
//!
//! Routes carry an ordered, type-erased list of request-time callbacks. The
//! router core never inspects a handler beyond the [`Handler`] trait: it
//! stores the chain at registration and hands it back on a match. Actually
//! driving handlers is the embedding server's job; [`HandlerChain::run`] is
//! the reference way to do it.

use crate::dispatch::Params;
use crate::route::Route;
use http::Method;
use std::fmt;
use std::sync::Arc;

/// Error type handlers may return.
///
/// Boxed so application error types flow through without the router taking
/// a dependency on them.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of running one handler, or a whole chain.
pub type HandlerResult = Result<(), HandlerError>;

/// Everything a handler gets to see about the request being dispatched.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// HTTP method of the dispatched request
    pub method: Method,
    /// The request path as dispatched, extension suffix still attached
    pub path: String,
    /// The matched route descriptor
    pub route: Arc<Route>,
    /// Extracted parameters, the reserved `ext` entry included
    pub params: Params,
}

/// A request-time callback attached to a route.
///
/// Implemented for any `Fn(&RequestContext) -> HandlerResult` that is
/// `Send + Sync`, so plain functions and capturing closures both register
/// directly:
///
/// ```
/// use volleyrouter::{HandlerChain, HandlerResult, RequestContext};
///
/// fn log_request(ctx: &RequestContext) -> HandlerResult {
///     println!("{} {}", ctx.method, ctx.path);
///     Ok(())
/// }
///
/// let chain = HandlerChain::new().with(log_request);
/// assert_eq!(chain.len(), 1);
/// ```
pub trait Handler: Send + Sync {
    /// Process one dispatched request
    fn handle(&self, ctx: &RequestContext) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&RequestContext) -> HandlerResult + Send + Sync,
{
    fn handle(&self, ctx: &RequestContext) -> HandlerResult {
        self(ctx)
    }
}

/// Ordered list of handlers to run for a matched route.
///
/// Chains are cheap to clone; handlers are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Create an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler, builder style
    #[must_use]
    pub fn with<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.push(handler);
        self
    }

    /// Append a handler in place
    pub fn push<H: Handler + 'static>(&mut self, handler: H) {
        self.handlers.push(Arc::new(handler));
    }

    /// Number of handlers in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain holds no handlers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler in registration order.
    ///
    /// The first handler returning an error stops the chain; the error is
    /// returned to the caller untouched.
    pub fn run(&self, ctx: &RequestContext) -> HandlerResult {
        for handler in &self.handlers {
            handler.handle(ctx)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("len", &self.handlers.len())
            .finish()
    }
}
