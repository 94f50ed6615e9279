//! Auth routes — session cookie, auth lifecycle, visitor extractors.
//!
//! Every gate transition has a JSON endpoint under `/api/auth` and an HTML
//! form endpoint under `/auth` that redirects back into the page shell.

use std::convert::Infallible;

use axum::Form;
use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::gate::{
    self, AuthError, AuthForm, AuthIntent, AuthMode, Identity, Role, SessionContext, SessionPhase, resolve_view,
};
use crate::render::{self, Page};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
        AuthError::AlreadyAuthenticated(_) => StatusCode::CONFLICT,
    }
}

/// Only same-origin absolute paths are valid redirect targets.
pub(crate) fn safe_return_path(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => p.to_owned(),
        _ => "/".to_owned(),
    }
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// The visitor behind a request: its token (if any) and a copy of its gate
/// context. Unknown or expired tokens read as a fresh anonymous context.
pub struct Visitor {
    pub token: Option<String>,
    pub context: SessionContext,
}

impl Visitor {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.context.identity()
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(COOKIE_NAME).map(|c| c.value().to_owned()) else {
            return Ok(Self { token: None, context: SessionContext::new() });
        };

        let app_state = AppState::from_ref(state);
        match app_state.sessions.context(&token).await {
            Some(context) => Ok(Self { token: Some(token), context }),
            None => Ok(Self { token: None, context: SessionContext::new() }),
        }
    }
}

/// An authenticated asset owner. Rejects everyone else with 403.
pub struct AssetOwner {
    pub token: String,
    pub identity: Identity,
}

impl<S> FromRequestParts<S> for AssetOwner
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let visitor = match Visitor::from_request_parts(parts, state).await {
            Ok(visitor) => visitor,
            Err(never) => match never {},
        };
        let (Some(token), Some(identity)) = (visitor.token, visitor.context.identity().cloned()) else {
            return Err(StatusCode::FORBIDDEN);
        };
        if identity.role != Role::AssetOwner {
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(Self { token, identity })
    }
}

// =============================================================================
// SESSION COOKIE
// =============================================================================

fn session_cookie(token: String, config: &ServerConfig) -> Cookie<'static> {
    let max_age = i64::try_from(config.session_idle_ttl.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(max_age))
        .build()
}

/// Reuse the visitor's live session or start a new one and set its cookie.
pub(crate) async fn ensure_session(state: &AppState, jar: CookieJar) -> (CookieJar, String) {
    if let Some(token) = jar.get(COOKIE_NAME).map(|c| c.value().to_owned()) {
        if state.sessions.contains(&token).await {
            return (jar, token);
        }
    }
    let token = state.sessions.create().await;
    let jar = jar.add(session_cookie(token.clone(), &state.config));
    (jar, token)
}

/// Middleware: any request carrying a live session touches its idle clock
/// and re-issues the cookie, so `Max-Age` slides with server-side activity.
pub(crate) async fn refresh_session(State(state): State<AppState>, jar: CookieJar, req: Request, next: Next) -> Response {
    let mut live = jar.get(COOKIE_NAME).map(|c| c.value().to_owned());
    if let Some(token) = &live {
        if state.sessions.with_session(token, |_| ()).await.is_none() {
            live = None;
        }
    }
    let resp = next.run(req).await;
    match live {
        Some(token) => (CookieJar::new().add(session_cookie(token, &state.config)), resp).into_response(),
        None => resp,
    }
}

// =============================================================================
// JSON API
// =============================================================================

#[derive(Serialize)]
pub struct SessionResponse {
    pub phase: SessionPhase,
    pub identity: Option<Identity>,
    pub auth_open: bool,
    pub intent: AuthIntent,
}

impl From<&SessionContext> for SessionResponse {
    fn from(ctx: &SessionContext) -> Self {
        Self { phase: ctx.phase(), identity: ctx.identity().cloned(), auth_open: ctx.auth_open(), intent: ctx.intent() }
    }
}

#[derive(Deserialize)]
pub struct BeginAuthBody {
    #[serde(default)]
    pub mode: AuthMode,
    pub role: Role,
    #[serde(default)]
    pub return_to: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ReturnTo {
    #[serde(default)]
    pub return_to: Option<String>,
}

/// `GET /api/auth/me` — current session state.
pub async fn me(visitor: Visitor) -> Json<SessionResponse> {
    Json(SessionResponse::from(&visitor.context))
}

/// `POST /api/auth/begin` — record mode and role, open the auth surface.
pub async fn begin(State(state): State<AppState>, jar: CookieJar, Json(body): Json<BeginAuthBody>) -> Response {
    let (jar, token) = ensure_session(&state, jar).await;
    match state
        .sessions
        .with_session(&token, |entry| {
            entry.context.begin_auth(body.mode, body.role);
            SessionResponse::from(&entry.context)
        })
        .await
    {
        Some(resp) => (jar, Json(resp)).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// `POST /api/auth/complete` — synthesize the identity from the form.
pub async fn complete(State(state): State<AppState>, jar: CookieJar, Json(form): Json<AuthForm>) -> Response {
    let (jar, token) = ensure_session(&state, jar).await;
    match state.sessions.with_session(&token, |entry| entry.complete_auth(form)).await {
        Some(Ok(identity)) => (jar, Json(identity)).into_response(),
        Some(Err(e)) => {
            debug!(error = %e, "auth completion rejected");
            (jar, (auth_error_to_status(&e), e.to_string())).into_response()
        }
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// `POST /api/auth/close` — dismiss the auth surface.
pub async fn close(State(state): State<AppState>, visitor: Visitor) -> StatusCode {
    if let Some(token) = visitor.token {
        let _ = state.sessions.with_session(&token, |entry| entry.context.close_auth()).await;
    }
    StatusCode::NO_CONTENT
}

/// `POST /api/auth/logout` — clear the identity. Always succeeds.
pub async fn logout(State(state): State<AppState>, visitor: Visitor) -> StatusCode {
    if let Some(token) = visitor.token {
        let _ = state.sessions.with_session(&token, |entry| entry.logout()).await;
    }
    StatusCode::NO_CONTENT
}

// =============================================================================
// HTML FORMS
// =============================================================================

/// `POST /auth/begin` — open the auth surface and return to the page.
pub async fn begin_form(State(state): State<AppState>, jar: CookieJar, Form(body): Form<BeginAuthBody>) -> Response {
    let (jar, token) = ensure_session(&state, jar).await;
    let _ = state
        .sessions
        .with_session(&token, |entry| entry.context.begin_auth(body.mode, body.role))
        .await;
    (jar, Redirect::to(&safe_return_path(body.return_to.as_deref()))).into_response()
}

/// `POST /auth/complete` — authenticate and land on the role dashboard.
///
/// Validation failures re-render the landing page with the auth surface
/// still open and the error inside it.
pub async fn complete_form(State(state): State<AppState>, jar: CookieJar, Form(form): Form<AuthForm>) -> Response {
    let (jar, token) = ensure_session(&state, jar).await;
    let outcome = state
        .sessions
        .with_session(&token, |entry| entry.complete_auth(form).map_err(|e| (e, entry.context.clone())))
        .await;

    match outcome {
        Some(Ok(identity)) => (jar, Redirect::to(gate::dashboard_path(Some(&identity)))).into_response(),
        Some(Err((err, context))) => {
            debug!(error = %err, "auth form rejected");
            let message = err.to_string();
            let html = render::render_page(&Page {
                path: "/",
                decision: resolve_view("/", context.identity()),
                context: &context,
                listings: None,
                auth_error: Some(&message),
                emissions: None,
            });
            (jar, (auth_error_to_status(&err), Html(html))).into_response()
        }
        None => {
            warn!("session vanished during auth form submit");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /auth/close` — dismiss the auth surface.
pub async fn close_form(State(state): State<AppState>, visitor: Visitor, Form(body): Form<ReturnTo>) -> Redirect {
    if let Some(token) = visitor.token {
        let _ = state.sessions.with_session(&token, |entry| entry.context.close_auth()).await;
    }
    Redirect::to(&safe_return_path(body.return_to.as_deref()))
}

/// `POST /auth/logout` — clear the identity and go home.
pub async fn logout_form(State(state): State<AppState>, visitor: Visitor) -> Redirect {
    if let Some(token) = visitor.token {
        let _ = state.sessions.with_session(&token, |entry| entry.logout()).await;
    }
    Redirect::to("/")
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
