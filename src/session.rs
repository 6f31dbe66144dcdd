//! Session and role context.
//!
//! Single owner of the authenticated identity for the lifetime of the app
//! load. The handshake with the identity provider runs exactly once, before
//! any gated route may render; every role check in the application reads
//! through this one context — no component caches its own copy.
//!
//! Fail-closed: if the handshake fails, no session exists and every gated
//! route stays unreachable.

use std::collections::BTreeSet;

use crate::identity::IdentityProvider;

// ═══════════════════════════════════════════════════════════
// Roles
// ═══════════════════════════════════════════════════════════

/// A role the application gates routes on.
///
/// Sessions carry the raw label set as issued by the realm, so labels the
/// client does not know about still round-trip; this enum names the ones
/// the route tree cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Doctor,
    Admin,
}

impl Role {
    /// Parse from the realm's wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "MEDECIN" => Some(Self::Doctor),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Wire label as issued by the realm.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Doctor => "MEDECIN",
            Self::Admin => "ADMIN",
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

/// The authenticated identity and role set for the current visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    display_name: String,
    roles: BTreeSet<String>,
}

impl Session {
    pub fn new(display_name: impl Into<String>, roles: BTreeSet<String>) -> Self {
        Self {
            display_name: display_name.into(),
            roles,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Raw role labels as issued by the realm.
    pub fn role_labels(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Pure membership test over the session's role set.
    pub fn is_in_role(&self, role: Role) -> bool {
        self.roles.contains(role.as_label())
    }

    /// True if the session holds at least one of the given roles.
    pub fn is_in_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.is_in_role(*role))
    }
}

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Errors from session lifecycle operations.
///
/// A failed handshake is fatal to the session: the application must not
/// expose gated routes afterwards.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Identity handshake failed: {0}")]
    Handshake(String),
    #[error("No authenticated user at the identity provider")]
    NotAuthenticated,
    #[error("Failed to load user profile: {0}")]
    ProfileLoad(String),
    #[error("Logout failed: {0}")]
    Logout(String),
}

// ═══════════════════════════════════════════════════════════
// SessionContext
// ═══════════════════════════════════════════════════════════

/// Single initialization point for the session.
///
/// Holds `None` until [`SessionContext::initialize`] succeeds; holds the
/// established session afterwards until an explicit, fully-successful
/// logout clears it.
#[derive(Debug, Default)]
pub struct SessionContext {
    session: Option<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// The established session, if any.
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_established(&self) -> bool {
        self.session.is_some()
    }

    /// Perform the identity-provider handshake and establish the session.
    ///
    /// Runs the handshake exactly once per app load: if a session is
    /// already established, it is returned without a second round-trip.
    /// On failure nothing is stored.
    pub async fn initialize<P: IdentityProvider>(
        &mut self,
        provider: &P,
    ) -> Result<&Session, AuthError> {
        if self.session.is_none() {
            if !provider.is_logged_in().await? {
                return Err(AuthError::NotAuthenticated);
            }

            let profile = provider.load_profile().await?;
            let session =
                Session::new(profile.display_name(), profile.roles.into_iter().collect());
            tracing::info!(
                user = %session.display_name,
                roles = ?session.roles,
                "Session established"
            );
            self.session = Some(session);
        }
        Ok(self.session.as_ref().expect("session established above"))
    }

    /// Invalidate the session at the provider, then clear client state.
    ///
    /// All-or-nothing: if the provider call fails, the session stays
    /// established and the error is surfaced — never a half-cleared state.
    pub async fn logout<P: IdentityProvider>(&mut self, provider: &P) -> Result<(), AuthError> {
        if self.session.is_none() {
            return Ok(());
        }
        provider.logout().await?;
        self.session = None;
        tracing::info!("Session cleared");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UserProfile;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider for exercising the context lifecycle.
    struct FakeProvider {
        logged_in: bool,
        roles: Vec<String>,
        fail_logout: bool,
        handshakes: AtomicUsize,
    }

    impl FakeProvider {
        fn doctor() -> Self {
            Self {
                logged_in: true,
                roles: vec!["MEDECIN".to_string()],
                fail_logout: false,
                handshakes: AtomicUsize::new(0),
            }
        }
    }

    impl IdentityProvider for FakeProvider {
        async fn is_logged_in(&self) -> Result<bool, AuthError> {
            self.handshakes.fetch_add(1, Ordering::SeqCst);
            Ok(self.logged_in)
        }

        async fn load_profile(&self) -> Result<UserProfile, AuthError> {
            Ok(UserProfile {
                username: Some("ghouse".to_string()),
                first_name: Some("Gregory".to_string()),
                last_name: Some("House".to_string()),
                roles: self.roles.clone(),
            })
        }

        async fn logout(&self) -> Result<(), AuthError> {
            if self.fail_logout {
                Err(AuthError::Logout("provider unreachable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    // ── Role labels ──────────────────────────────────────

    #[test]
    fn role_label_round_trip() {
        assert_eq!(Role::from_label("MEDECIN"), Some(Role::Doctor));
        assert_eq!(Role::from_label("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_label("NURSE"), None);
        assert_eq!(Role::Doctor.as_label(), "MEDECIN");
        assert_eq!(Role::Admin.as_label(), "ADMIN");
    }

    #[test]
    fn membership_checks_use_wire_labels() {
        let session = Session::new(
            "Dr. House",
            ["MEDECIN".to_string(), "chief".to_string()].into(),
        );
        assert!(session.is_in_role(Role::Doctor));
        assert!(!session.is_in_role(Role::Admin));
        assert!(session.is_in_any(&[Role::Doctor, Role::Admin]));
        assert!(!session.is_in_any(&[Role::Admin]));
        // Unknown labels are preserved even though nothing gates on them.
        assert!(session.role_labels().contains("chief"));
    }

    // ── Initialization ───────────────────────────────────

    #[tokio::test]
    async fn initialize_establishes_session() {
        let provider = FakeProvider::doctor();
        let mut context = SessionContext::new();
        assert!(!context.is_established());

        let session = context.initialize(&provider).await.unwrap();
        assert_eq!(session.display_name(), "Gregory House");
        assert!(session.is_in_role(Role::Doctor));
        assert!(context.is_established());
    }

    #[tokio::test]
    async fn initialize_runs_handshake_exactly_once() {
        let provider = FakeProvider::doctor();
        let mut context = SessionContext::new();

        context.initialize(&provider).await.unwrap();
        context.initialize(&provider).await.unwrap();

        assert_eq!(provider.handshakes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unauthenticated_user_fails_closed() {
        let provider = FakeProvider {
            logged_in: false,
            ..FakeProvider::doctor()
        };
        let mut context = SessionContext::new();

        let result = context.initialize(&provider).await;
        assert!(matches!(result, Err(AuthError::NotAuthenticated)));
        assert!(!context.is_established(), "No session after failure");
    }

    // ── Logout ───────────────────────────────────────────

    #[tokio::test]
    async fn logout_clears_session() {
        let provider = FakeProvider::doctor();
        let mut context = SessionContext::new();
        context.initialize(&provider).await.unwrap();

        context.logout(&provider).await.unwrap();
        assert!(!context.is_established());
    }

    #[tokio::test]
    async fn failed_logout_keeps_session_intact() {
        let provider = FakeProvider {
            fail_logout: true,
            ..FakeProvider::doctor()
        };
        let mut context = SessionContext::new();
        context.initialize(&provider).await.unwrap();

        let result = context.logout(&provider).await;
        assert!(matches!(result, Err(AuthError::Logout(_))));
        assert!(context.is_established(), "All-or-nothing: session remains");
    }

    #[tokio::test]
    async fn logout_without_session_is_a_no_op() {
        let provider = FakeProvider::doctor();
        let mut context = SessionContext::new();
        context.logout(&provider).await.unwrap();
        assert!(!context.is_established());
    }
}
