//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. CORS (answers preflights before anything else runs)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
