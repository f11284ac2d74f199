//! Souq Storefront library.
//!
//! The shop server as a library, so the binary and the integration tests
//! build the same application:
//! - catalog browsing and shipping zones
//! - session cart with drawer
//! - checkout flow against an order gateway
//! - the admin API from `souq-admin` under `/api/admin`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::StorefrontConfig;
pub use routes::app;
pub use state::AppState;
