use super::*;

fn form(email: &str, password: &str) -> AuthForm {
    AuthForm { email: email.into(), password: password.into(), ..AuthForm::default() }
}

fn signed_in(role: Role) -> SessionContext {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Login, role);
    ctx.complete_auth(form("ops@example.com", "pw")).unwrap();
    ctx
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_as_str_matches_wire_name() {
    for role in [Role::Retailer, Role::AssetOwner] {
        assert_eq!(serde_json::to_value(role).unwrap(), role.as_str());
    }
}

#[test]
fn role_deserializes_snake_and_kebab_asset_owner() {
    let parse = |raw: &str| serde_json::from_value::<Role>(serde_json::Value::from(raw)).ok();
    assert_eq!(parse("assetOwner"), Some(Role::AssetOwner));
    assert_eq!(parse("asset_owner"), Some(Role::AssetOwner));
    assert_eq!(parse("asset-owner"), Some(Role::AssetOwner));
    assert_eq!(parse("admin"), None);
}

#[test]
fn role_serializes_camel_case() {
    assert_eq!(serde_json::to_value(Role::AssetOwner).unwrap(), "assetOwner");
    assert_eq!(serde_json::to_value(Role::Retailer).unwrap(), "retailer");
}

// =============================================================================
// begin_auth / close_auth
// =============================================================================

#[test]
fn new_context_is_anonymous_with_closed_surface() {
    let ctx = SessionContext::new();
    assert_eq!(ctx.phase(), SessionPhase::Anonymous);
    assert!(!ctx.auth_open());
    assert_eq!(ctx.intent(), AuthIntent::default());
}

#[test]
fn begin_auth_records_intent_and_opens_surface() {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Register, Role::AssetOwner);
    assert!(ctx.auth_open());
    assert_eq!(ctx.intent(), AuthIntent { mode: AuthMode::Register, role: Role::AssetOwner });
    assert!(ctx.identity().is_none());
}

#[test]
fn begin_auth_does_not_touch_existing_identity() {
    let mut ctx = signed_in(Role::Retailer);
    ctx.begin_auth(AuthMode::Login, Role::AssetOwner);
    assert_eq!(ctx.phase(), SessionPhase::Authenticated(Role::Retailer));
}

#[test]
fn close_auth_hides_surface_and_keeps_intent() {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Login, Role::AssetOwner);
    ctx.close_auth();
    assert!(!ctx.auth_open());
    assert_eq!(ctx.intent().role, Role::AssetOwner);
}

// =============================================================================
// complete_auth
// =============================================================================

#[test]
fn complete_auth_uses_recorded_role() {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Login, Role::AssetOwner);
    let identity = ctx.complete_auth(form("owner@example.com", "secret")).unwrap();
    assert_eq!(identity.role, Role::AssetOwner);
    assert_eq!(ctx.phase(), SessionPhase::Authenticated(Role::AssetOwner));
    assert!(!ctx.auth_open());
}

#[test]
fn complete_auth_without_begin_defaults_to_retailer() {
    let mut ctx = SessionContext::new();
    let identity = ctx.complete_auth(form("shop@example.com", "secret")).unwrap();
    assert_eq!(identity.role, Role::Retailer);
}

#[test]
fn complete_auth_defaults_name_and_drops_blank_organization() {
    let mut ctx = SessionContext::new();
    let identity = ctx
        .complete_auth(AuthForm { organization: "   ".into(), ..form("a@b.c", "pw") })
        .unwrap();
    assert_eq!(identity.name, DEFAULT_DISPLAY_NAME);
    assert!(identity.organization.is_none());
}

#[test]
fn complete_auth_keeps_name_and_organization() {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Register, Role::Retailer);
    let identity = ctx
        .complete_auth(AuthForm {
            name: " Ada Lovelace ".into(),
            organization: "Analytical Goods".into(),
            ..form(" ada@example.com ", "pw")
        })
        .unwrap();
    assert_eq!(identity.name, "Ada Lovelace");
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.organization.as_deref(), Some("Analytical Goods"));
}

#[test]
fn complete_auth_generates_distinct_ids() {
    let mut a = SessionContext::new();
    let mut b = SessionContext::new();
    let ia = a.complete_auth(form("a@example.com", "pw")).unwrap();
    let ib = b.complete_auth(form("a@example.com", "pw")).unwrap();
    assert_ne!(ia.id, ib.id);
}

#[test]
fn complete_auth_rejects_blank_email() {
    let mut ctx = SessionContext::new();
    let err = ctx.complete_auth(form("  ", "pw")).unwrap_err();
    assert_eq!(err, AuthError::MissingField("email"));
    assert_eq!(ctx.phase(), SessionPhase::Anonymous);
}

#[test]
fn complete_auth_rejects_empty_password() {
    let mut ctx = SessionContext::new();
    let err = ctx.complete_auth(form("a@example.com", "")).unwrap_err();
    assert_eq!(err, AuthError::MissingField("password"));
}

#[test]
fn complete_auth_register_requires_name() {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Register, Role::AssetOwner);
    let err = ctx.complete_auth(form("a@example.com", "pw")).unwrap_err();
    assert_eq!(err, AuthError::MissingField("name"));
    assert!(ctx.auth_open());
}

#[test]
fn complete_auth_register_requires_organization() {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Register, Role::Retailer);
    let err = ctx
        .complete_auth(AuthForm { name: "Ada".into(), organization: "   ".into(), ..form("a@example.com", "pw") })
        .unwrap_err();
    assert_eq!(err, AuthError::MissingField("organization"));
    assert_eq!(ctx.phase(), SessionPhase::Anonymous);
}

#[test]
fn complete_auth_login_ignores_missing_organization() {
    let mut ctx = SessionContext::new();
    ctx.begin_auth(AuthMode::Login, Role::AssetOwner);
    assert!(ctx.complete_auth(form("a@example.com", "pw")).is_ok());
}

#[test]
fn complete_auth_while_authenticated_is_rejected() {
    let mut ctx = signed_in(Role::AssetOwner);
    ctx.begin_auth(AuthMode::Login, Role::Retailer);
    let err = ctx.complete_auth(form("b@example.com", "pw")).unwrap_err();
    assert_eq!(err, AuthError::AlreadyAuthenticated(Role::AssetOwner));
    assert_eq!(ctx.phase(), SessionPhase::Authenticated(Role::AssetOwner));
}

// =============================================================================
// logout
// =============================================================================

#[test]
fn logout_when_anonymous_is_noop() {
    let mut ctx = SessionContext::new();
    ctx.logout();
    ctx.logout();
    assert_eq!(ctx.phase(), SessionPhase::Anonymous);
}

#[test]
fn logout_clears_identity() {
    let mut ctx = signed_in(Role::Retailer);
    ctx.logout();
    assert!(ctx.identity().is_none());
    assert_eq!(ctx.phase(), SessionPhase::Anonymous);
}

#[test]
fn role_is_not_sticky_across_logout() {
    let mut ctx = signed_in(Role::AssetOwner);
    ctx.logout();
    ctx.begin_auth(AuthMode::Login, Role::Retailer);
    ctx.complete_auth(form("second@example.com", "pw2")).unwrap();
    assert_eq!(ctx.phase(), SessionPhase::Authenticated(Role::Retailer));
}

// =============================================================================
// Gate scenarios
// =============================================================================

#[test]
fn navigation_follows_role_after_complete_auth() {
    for role in [Role::Retailer, Role::AssetOwner] {
        let ctx = signed_in(role);
        let items = navigation_items(ctx.identity());
        let paths: Vec<&str> = items.iter().map(|i| i.path).collect();
        match role {
            Role::Retailer => {
                assert!(paths.contains(&"/retailer-dashboard"));
                assert!(!paths.contains(&"/manage-listings"));
                assert!(!paths.contains(&"/asset-owner-dashboard"));
            }
            Role::AssetOwner => {
                assert!(paths.contains(&"/asset-owner-dashboard"));
                assert!(paths.contains(&"/manage-listings"));
                assert!(!paths.contains(&"/retailer-dashboard"));
            }
        }
    }
}

#[test]
fn retailer_cannot_reach_asset_owner_dashboard() {
    let ctx = signed_in(Role::Retailer);
    assert_eq!(resolve_view("/asset-owner-dashboard", ctx.identity()).view(), View::Landing);
}

#[test]
fn asset_owner_reaches_manage_listings() {
    let ctx = signed_in(Role::AssetOwner);
    assert_eq!(resolve_view("/manage-listings", ctx.identity()).view(), View::ManageListings);
}

#[test]
fn session_phase_serializes_tagged() {
    let json = serde_json::to_value(SessionPhase::Authenticated(Role::AssetOwner)).unwrap();
    assert_eq!(json["state"], "authenticated");
    assert_eq!(json["role"], "assetOwner");
    let anon = serde_json::to_value(SessionPhase::Anonymous).unwrap();
    assert_eq!(anon["state"], "anonymous");
}
