//! Session-stored shopper state.

pub mod session;

pub use session::keys as session_keys;
