//! View routes — gate queries as JSON and the rendered page shell.

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::auth::Visitor;
use crate::gate::view::normalize_path;
use crate::gate::{
    Breadcrumb, NavItem, View, ViewDecision, breadcrumbs, dashboard_path, navigation_items, resolve_view, user_menu_items,
};
use crate::render::{self, Page};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: Option<String>,
}

impl PathQuery {
    fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("/")
    }
}

#[derive(Serialize)]
pub struct ViewResponse {
    pub outcome: ViewDecision,
    pub view: View,
    pub title: &'static str,
}

#[derive(Serialize)]
pub struct NavResponse {
    pub items: Vec<NavItem>,
    pub user_menu: Vec<NavItem>,
    pub dashboard: &'static str,
}

/// `GET /api/view?path=` — what would be rendered for `path`.
pub async fn view(visitor: Visitor, Query(q): Query<PathQuery>) -> Json<ViewResponse> {
    let decision = resolve_view(q.path(), visitor.identity());
    let view = decision.view();
    Json(ViewResponse { outcome: decision, view, title: view.title() })
}

/// `GET /api/nav` — header and user-menu entries for the visitor.
pub async fn nav(visitor: Visitor) -> Json<NavResponse> {
    let identity = visitor.identity();
    Json(NavResponse {
        items: navigation_items(identity),
        user_menu: user_menu_items(identity),
        dashboard: dashboard_path(identity),
    })
}

/// `GET /api/breadcrumbs?path=`
pub async fn crumbs(Query(q): Query<PathQuery>) -> Json<Vec<Breadcrumb>> {
    Json(breadcrumbs(q.path()))
}

/// `GET /` and `GET /{*path}` — render the page shell for the resolved view.
pub async fn page(State(state): State<AppState>, visitor: Visitor, uri: Uri) -> Response {
    let path = normalize_path(uri.path());
    let decision = resolve_view(&path, visitor.identity());
    if decision.is_denied() {
        debug!(?decision, path = %path, "gated view requested; rendering landing");
    }

    let listings = match (decision.view(), visitor.token.as_deref()) {
        (View::ManageListings, Some(token)) => state.sessions.with_session(token, |entry| entry.listings.clone()).await,
        _ => None,
    };

    let html = render::render_page(&Page {
        path: &path,
        decision,
        context: &visitor.context,
        listings: listings.as_ref(),
        auth_error: None,
        emissions: None,
    });

    let status = if decision.view() == View::NotFound { StatusCode::NOT_FOUND } else { StatusCode::OK };
    (status, Html(html)).into_response()
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
