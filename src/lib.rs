//! # cors-filter
//!
//! A Cross-Origin Resource Sharing (CORS) filter that decorates request
//! handlers. Per request it decides whether the requesting origin is allowed,
//! writes the `Access-Control-*` headers that tell the browser so, and answers
//! preflight requests directly without running the wrapped handler.
//!
//! ## Architecture
//!
//! - **[`handler`]** - The handler shape the filter wraps: context, response writer, request
//! - **[`middleware`]** - The [`Middleware`](middleware::Middleware) seam and the CORS filter
//!   - [`CorsConfig`](middleware::CorsConfig) - declarative policy, serde-loadable
//!   - [`OriginValidation`](middleware::cors::OriginValidation) - ordered allow-list matcher
//!   - [`CorsFilter`](middleware::CorsFilter) - per-request orchestration
//! - **[`logging`]** - `tracing-subscriber` setup for the binary
//! - **[`cli`]** - `cors-filter evaluate` / `cors-filter defaults`
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Server
//!     participant Filter as CorsFilter
//!     participant Skipper
//!     participant Matcher as OriginValidation
//!     participant Handler
//!
//!     Server->>Filter: call(ctx, rw, req)
//!     Filter->>Skipper: skip(ctx, req)?
//!     alt skipped
//!         Filter->>Handler: call(ctx, rw, req)
//!         Handler-->>Server: result (no CORS headers)
//!     end
//!     Filter->>Matcher: allowed_origin(Origin, credentials)
//!     alt OPTIONS (preflight)
//!         Filter->>Filter: Allow-Origin / Methods / Headers / Credentials / Max-Age
//!         Filter-->>Server: 204 No Content, empty body
//!     else actual request
//!         Filter->>Filter: Allow-Origin / Credentials / Expose-Headers
//!         Filter->>Handler: call(ctx, rw, req)
//!         Handler-->>Server: handler's status, body or error
//!     end
//! ```
//!
//! A disallowed origin is never an error: the request proceeds without an
//! `Access-Control-Allow-Origin` header and the browser enforces the policy.
//!
//! ## Quick Start
//!
//! ```rust
//! use cors_filter::handler::{handler_fn, Handler, HandlerRequest, RequestContext, ResponseWriter};
//! use cors_filter::middleware::{CorsMiddlewareBuilder, Middleware};
//! use http::{Method, StatusCode};
//!
//! let cors = CorsMiddlewareBuilder::new()
//!     .allow_origins(&["localhost"])
//!     .allow_credentials(true)
//!     .max_age(3600)
//!     .build();
//! let filter = cors.wrap(handler_fn(|_ctx, rw: &mut ResponseWriter, _req| {
//!     rw.write_json(StatusCode::OK, &"ok")
//! }));
//!
//! let req = HandlerRequest::new(Method::OPTIONS, "/")
//!     .with_header(http::header::ORIGIN, "localhost".parse().unwrap());
//! let mut rw = ResponseWriter::new();
//! filter.call(&RequestContext::new(), &mut rw, &req).unwrap();
//!
//! assert_eq!(rw.status(), StatusCode::NO_CONTENT);
//! assert_eq!(rw.header("access-control-allow-origin"), Some("localhost"));
//! assert_eq!(rw.header("access-control-max-age"), Some("3600"));
//! ```
//!
//! ## Configuration
//!
//! Policies can be loaded from YAML:
//!
//! ```yaml
//! allow_origins: ["https://app.example.com"]
//! allow_headers: [Content-Type, Authorization]
//! expose_headers: [ETag]
//! allow_credentials: true
//! max_age: 3600
//! ```
//!
//! Omitted fields take their defaults: any origin, methods
//! `GET,HEAD,PUT,PATCH,POST,DELETE`, no credentials, no caching.

pub mod cli;
pub mod handler;
pub mod ids;
pub mod logging;
pub mod middleware;

pub use handler::{handler_fn, Handler, HandlerRequest, RequestContext, ResponseWriter};
pub use middleware::{CorsConfig, CorsFilter, CorsMiddleware, CorsMiddlewareBuilder, Middleware};
