mod core;
pub mod cors;

pub use self::core::Middleware;
pub use cors::{
    skip_fn, CorsConfig, CorsFilter, CorsMiddleware, CorsMiddlewareBuilder, CorsPolicy, NeverSkip,
    Skipper,
};
