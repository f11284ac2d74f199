//! State shared by admin handlers.
//!
//! The admin router is generic over the host application's state; the host
//! implements `FromRef<HostState> for AdminState` to hand these pieces over.

use std::sync::Arc;

use secrecy::SecretString;

use souq_core::SharedShop;

use crate::claude::{ClaudeClient, ClaudeError, TextGenerator};
use crate::config::AdminConfig;
use crate::services::Copywriter;

/// Admin handler state.
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<AdminStateInner>,
}

struct AdminStateInner {
    shop: SharedShop,
    copywriter: Copywriter,
    password: SecretString,
}

impl std::fmt::Debug for AdminState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminState")
            .field("copywriter", &self.inner.copywriter)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl AdminState {
    #[must_use]
    pub fn new(shop: SharedShop, copywriter: Copywriter, password: SecretString) -> Self {
        Self {
            inner: Arc::new(AdminStateInner {
                shop,
                copywriter,
                password,
            }),
        }
    }

    /// Build admin state from configuration, creating the Claude client when
    /// an API key is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the Claude client cannot be created.
    pub fn from_config(shop: SharedShop, config: &AdminConfig) -> Result<Self, ClaudeError> {
        let generator = match config.claude() {
            Some(claude) => {
                let client = ClaudeClient::new(claude)?;
                tracing::info!(model = client.model(), "Claude copywriting enabled");
                Some(Arc::new(client) as Arc<dyn TextGenerator>)
            }
            None => {
                tracing::info!("ANTHROPIC_API_KEY not set, AI copywriting disabled");
                None
            }
        };

        Ok(Self::new(
            shop,
            Copywriter::new(generator),
            config.password.clone(),
        ))
    }

    #[must_use]
    pub fn shop(&self) -> &SharedShop {
        &self.inner.shop
    }

    #[must_use]
    pub fn copywriter(&self) -> &Copywriter {
        &self.inner.copywriter
    }

    /// The shared admin password.
    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.inner.password
    }
}
