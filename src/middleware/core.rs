use crate::handler::Handler;

/// A decorator that turns one handler into another of the same shape.
///
/// Implementors keep their configuration immutable so that one middleware
/// value can wrap any number of handlers and the results can serve requests
/// concurrently.
pub trait Middleware<H: Handler> {
    /// The handler produced by wrapping `H`
    type Wrapped: Handler;

    fn wrap(&self, inner: H) -> Self::Wrapped;
}
