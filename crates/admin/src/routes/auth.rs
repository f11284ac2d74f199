//! Admin login prompt and session gate.
//!
//! The gate lives in the session; every handler here loads it, applies one
//! transition and stores it back.

use axum::{Json, extract::State};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use souq_core::AdminGate;
use souq_core::admin::LOGIN_ERROR;

use crate::error::{AppError, Result};
use crate::models::session::{load_gate, save_gate};
use crate::state::AdminState;

/// Admin gate as seen by the client.
#[derive(Debug, Serialize)]
pub struct GateView {
    pub is_admin: bool,
    pub prompt_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_error: Option<&'static str>,
}

impl From<&AdminGate> for GateView {
    fn from(gate: &AdminGate) -> Self {
        Self {
            is_admin: gate.is_admin(),
            prompt_open: gate.is_prompt_open(),
            login_error: gate.has_login_error().then_some(LOGIN_ERROR),
        }
    }
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Current admin gate state.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<GateView>> {
    let gate = load_gate(&session).await?;
    Ok(Json(GateView::from(&gate)))
}

/// Open the password prompt.
#[instrument(skip(session))]
pub async fn open_prompt(session: Session) -> Result<Json<GateView>> {
    let mut gate = load_gate(&session).await?;
    gate.open_prompt();
    save_gate(&session, &gate).await?;
    Ok(Json(GateView::from(&gate)))
}

/// Check the submitted password.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AdminState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<GateView>> {
    let mut gate = load_gate(&session).await?;
    let accepted = gate.submit(&form.password, state.password().expose_secret());

    if accepted {
        // Fresh session id on privilege change
        session.cycle_id().await?;
    }
    save_gate(&session, &gate).await?;

    if accepted {
        tracing::info!("Admin logged in");
        Ok(Json(GateView::from(&gate)))
    } else {
        tracing::warn!("Admin login failed");
        Err(AppError::InvalidPassword)
    }
}

/// Close the password prompt.
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Result<Json<GateView>> {
    let mut gate = load_gate(&session).await?;
    gate.cancel();
    save_gate(&session, &gate).await?;
    Ok(Json(GateView::from(&gate)))
}

/// Leave admin mode.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<GateView>> {
    let mut gate = load_gate(&session).await?;
    gate.logout();
    save_gate(&session, &gate).await?;
    tracing::info!("Admin logged out");
    Ok(Json(GateView::from(&gate)))
}
