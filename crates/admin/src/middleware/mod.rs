//! Request extractors for admin routes.

pub mod auth;

pub use auth::{AdminAuthRejection, RequireAdmin};
