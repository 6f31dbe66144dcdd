//! Client-side core of the MedInsight clinic management app.
//!
//! Owns the logic a UI shell drives: the session/role context established
//! once per app load, the role-gated navigation model, the REST resource
//! client, list view-state, and the AI diagnosis wizard. Rendering,
//! token issuance, and the backend itself live elsewhere.

pub mod api;
pub mod config;
pub mod home;
pub mod identity;
pub mod listing;
pub mod models;
pub mod navigation;
pub mod session;
pub mod wizard;

use tracing_subscriber::EnvFilter;

use crate::api::ResourceClient;
use crate::config::AppConfig;
use crate::identity::IdentityProvider;
use crate::models::Patient;
use crate::navigation::MenuSection;
use crate::session::{AuthError, Session, SessionContext};

/// Install the global tracing subscriber. Call once, before [`App::start`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// The running application core, handed to the UI shell.
///
/// Exists only with an established session — [`App::start`] fails closed
/// when the identity handshake does, so gated routes can never render
/// unauthenticated.
pub struct App {
    config: AppConfig,
    session: SessionContext,
    patients: ResourceClient<Patient>,
}

impl App {
    /// The single initialization point: identity handshake, then wire up
    /// the backend clients.
    pub async fn start<P: IdentityProvider>(
        config: AppConfig,
        provider: &P,
    ) -> Result<Self, AuthError> {
        let mut session = SessionContext::new();
        session.initialize(provider).await?;
        tracing::info!("{} v{} ready", config::APP_NAME, config::APP_VERSION);

        let patients = ResourceClient::new(&config.api_base_url);
        Ok(Self {
            config,
            session,
            patients,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The established session; `None` only after a successful logout.
    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    /// The sidebar for the current session.
    pub fn menu(&self) -> Vec<MenuSection> {
        navigation::resolve_menu(self.session.current())
    }

    /// Routing guard for the shell's router.
    pub fn can_enter(&self, path: &str) -> bool {
        navigation::can_enter(self.session.current(), path)
    }

    /// The patient records gateway.
    pub fn patients(&self) -> &ResourceClient<Patient> {
        &self.patients
    }

    /// End the session. All-or-nothing: on provider failure the session
    /// stays valid and the error is surfaced.
    pub async fn logout<P: IdentityProvider>(&mut self, provider: &P) -> Result<(), AuthError> {
        self.session.logout(provider).await
    }
}
