//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span and Sentry scope)
//! 4. Session layer (tower-sessions with the in-memory store)

pub mod request_id;
pub mod session;

pub use request_id::request_id_middleware;
pub use session::create_session_layer;
