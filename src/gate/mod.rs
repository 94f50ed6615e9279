//! Session/role gate — identity, auth lifecycle, view and menu decisions.
//!
//! ARCHITECTURE
//! ============
//! A `SessionContext` is the single owner of one browser session's state:
//! the pending auth intent, whether the auth surface is open, and the
//! optional `Identity`. The session store hands one context to each request
//! for that session; nothing else mutates it.
//!
//! `resolve_view` and `navigation_items` are pure functions over
//! `Option<&Identity>` so routing and header rendering never touch session
//! state directly.
//!
//! TRADE-OFFS
//! ==========
//! `complete_auth` never checks credentials. Any non-blank email/password
//! pair yields an identity. This is a placeholder for a real backend.

pub mod nav;
pub mod view;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

pub use nav::{Breadcrumb, NavItem, breadcrumbs, dashboard_path, navigation_items, user_menu_items};
pub use view::{View, ViewDecision, resolve_view};

/// Display name used when the auth form leaves `name` blank.
pub const DEFAULT_DISPLAY_NAME: &str = "Demo User";

// =============================================================================
// TYPES
// =============================================================================

/// Marketplace role, fixed when authentication begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Retailer,
    #[serde(alias = "asset_owner", alias = "asset-owner")]
    AssetOwner,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retailer => "retailer",
            Self::AssetOwner => "assetOwner",
        }
    }

    /// Human label shown next to the user's name in the header.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Retailer => "Retailer",
            Self::AssetOwner => "Asset Owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which variant of the auth surface the visitor asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Mode and role recorded by `begin_auth`, consumed by `complete_auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIntent {
    pub mode: AuthMode,
    pub role: Role,
}

impl Default for AuthIntent {
    fn default() -> Self {
        Self { mode: AuthMode::Login, role: Role::Retailer }
    }
}

/// The authenticated visitor. Synthesized locally from the auth form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// Submitted auth form. Role is not part of the form; it comes from the intent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    /// Company name for retailers, property/organization name for asset owners.
    #[serde(default, alias = "company")]
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("already authenticated as {0}; log out before switching roles")]
    AlreadyAuthenticated(Role),
}

/// Two-state session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "role", rename_all = "camelCase")]
pub enum SessionPhase {
    Anonymous,
    Authenticated(Role),
}

// =============================================================================
// SESSION CONTEXT
// =============================================================================

/// Per-session gate state. Owned by exactly one session store entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionContext {
    intent: AuthIntent,
    auth_open: bool,
    identity: Option<Identity>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn intent(&self) -> AuthIntent {
        self.intent
    }

    /// Whether the auth surface should be presented on the next render.
    #[must_use]
    pub fn auth_open(&self) -> bool {
        self.auth_open
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match &self.identity {
            Some(identity) => SessionPhase::Authenticated(identity.role),
            None => SessionPhase::Anonymous,
        }
    }

    /// Record the intended mode and role and open the auth surface.
    pub fn begin_auth(&mut self, mode: AuthMode, role: Role) {
        self.intent = AuthIntent { mode, role };
        self.auth_open = true;
    }

    /// Dismiss the auth surface without authenticating.
    pub fn close_auth(&mut self) {
        self.auth_open = false;
    }

    /// Build an identity from the form and the recorded intent, and make it current.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `email` or `password` is blank (or `name` or
    /// `organization` in register mode), and `AlreadyAuthenticated` if the session already has
    /// an identity.
    pub fn complete_auth(&mut self, form: AuthForm) -> Result<Identity, AuthError> {
        if let Some(current) = &self.identity {
            return Err(AuthError::AlreadyAuthenticated(current.role));
        }
        validate_form(&form, self.intent.mode)?;

        let name = form.name.trim();
        let organization = form.organization.trim();
        let identity = Identity {
            id: Uuid::new_v4().to_string(),
            name: if name.is_empty() { DEFAULT_DISPLAY_NAME.to_owned() } else { name.to_owned() },
            email: form.email.trim().to_owned(),
            role: self.intent.role,
            organization: (!organization.is_empty()).then(|| organization.to_owned()),
        };

        info!(role = %identity.role, identity_id = %identity.id, "session authenticated");
        self.identity = Some(identity.clone());
        self.auth_open = false;
        Ok(identity)
    }

    /// Clear the identity. No-op when already anonymous.
    pub fn logout(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!(role = %identity.role, identity_id = %identity.id, "session logged out");
        }
    }
}

fn validate_form(form: &AuthForm, mode: AuthMode) -> Result<(), AuthError> {
    if form.email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if form.password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    if mode == AuthMode::Register {
        if form.name.trim().is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if form.organization.trim().is_empty() {
            return Err(AuthError::MissingField("organization"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
