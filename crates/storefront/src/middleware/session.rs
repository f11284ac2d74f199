//! Session middleware configuration.
//!
//! Sessions hold the per-shopper cart, checkout drawer and admin gate. They
//! are kept in the in-memory store, so they do not survive a restart.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "souq_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer over an in-memory store.
///
/// Cookies are marked `Secure` when the public URL is https.
#[must_use]
pub fn create_session_layer(
    store: MemoryStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
