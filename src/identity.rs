//! Identity provider integration.
//!
//! The core talks to the external identity provider (Keycloak in the
//! original deployment) through the [`IdentityProvider`] seam so the
//! session context can be exercised without a network. Token issuance and
//! refresh are the provider's concern, not this crate's: the HTTP
//! implementation holds one opaque bearer token and only attaches it.

use serde::Deserialize;

use crate::config::IdentityConfig;
use crate::session::AuthError;

// ═══════════════════════════════════════════════════════════
// Provider seam
// ═══════════════════════════════════════════════════════════

/// Profile fields the application reads from the provider.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Vec<String>,
}

impl UserProfile {
    /// Display name shown in the toolbar: "First Last" when a first name
    /// exists, else the username, else "User".
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self
                .username
                .clone()
                .unwrap_or_else(|| "User".to_string()),
        }
    }
}

/// External identity provider, as consumed by the session context.
pub trait IdentityProvider {
    /// Whether the provider currently holds an authenticated user.
    fn is_logged_in(&self) -> impl std::future::Future<Output = Result<bool, AuthError>> + Send;

    /// Load the authenticated user's profile (name + role labels).
    fn load_profile(
        &self,
    ) -> impl std::future::Future<Output = Result<UserProfile, AuthError>> + Send;

    /// Invalidate the provider-side session.
    fn logout(&self) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;
}

// ═══════════════════════════════════════════════════════════
// Keycloak HTTP implementation
// ═══════════════════════════════════════════════════════════

/// Userinfo response from the realm's OpenID Connect endpoint.
#[derive(Deserialize)]
struct UserInfoResponse {
    preferred_username: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    realm_access: Option<RealmAccess>,
}

#[derive(Deserialize)]
struct RealmAccess {
    roles: Vec<String>,
}

/// Keycloak-backed identity provider.
pub struct KeycloakProvider {
    config: IdentityConfig,
    token: String,
    http: reqwest::Client,
}

impl KeycloakProvider {
    pub fn new(config: IdentityConfig, token: impl Into<String>) -> Self {
        Self {
            config,
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    fn realm_url(&self, suffix: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/{}",
            self.config.endpoint, self.config.realm, suffix
        )
    }

    async fn fetch_userinfo(&self) -> Result<reqwest::Response, AuthError> {
        self.http
            .get(self.realm_url("userinfo"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AuthError::Handshake(format!(
                        "identity provider unreachable at {}",
                        self.config.endpoint
                    ))
                } else {
                    AuthError::Handshake(e.to_string())
                }
            })
    }
}

impl IdentityProvider for KeycloakProvider {
    async fn is_logged_in(&self) -> Result<bool, AuthError> {
        let response = self.fetch_userinfo().await?;
        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            Ok(false)
        } else {
            Err(AuthError::Handshake(format!(
                "userinfo returned {status}"
            )))
        }
    }

    async fn load_profile(&self) -> Result<UserProfile, AuthError> {
        let response = self.fetch_userinfo().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ProfileLoad(format!(
                "userinfo returned {status}"
            )));
        }

        let info: UserInfoResponse = response
            .json()
            .await
            .map_err(|e| AuthError::ProfileLoad(e.to_string()))?;

        Ok(UserProfile {
            username: info.preferred_username,
            first_name: info.given_name,
            last_name: info.family_name,
            roles: info.realm_access.map(|r| r.roles).unwrap_or_default(),
        })
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.realm_url("logout"))
            .bearer_auth(&self.token)
            .form(&[("client_id", self.config.client_id.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::Logout(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AuthError::Logout(format!("logout returned {status}")))
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
