//! Session-stored admin state.

use tower_sessions::Session;

use souq_core::AdminGate;

/// Session keys for admin data.
pub mod keys {
    /// Key for the admin gate (`{is_admin, prompt_open, login_error}`).
    pub const ADMIN_GATE: &str = "souq-admin";
}

/// Read the admin gate from the session; a missing entry is a fresh gate.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_gate(session: &Session) -> Result<AdminGate, tower_sessions::session::Error> {
    Ok(session
        .get::<AdminGate>(keys::ADMIN_GATE)
        .await?
        .unwrap_or_default())
}

/// Store the admin gate in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_gate(
    session: &Session,
    gate: &AdminGate,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::ADMIN_GATE, gate).await
}
