//! Marketplace routes — credit catalog, footprint estimator, listings manager.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use serde::Serialize;
use tracing::{debug, info};

use super::auth::{AssetOwner, Visitor};
use crate::gate::resolve_view;
use crate::render::{self, Page};
use crate::services::catalog::{self, CarbonCredit, CreditQuery};
use crate::services::estimator::{self, Emissions, EstimatorForm, EstimatorInput};
use crate::services::listings::{Listing, ListingError, ListingQuery, ListingStats};
use crate::state::AppState;

pub(crate) fn listing_error_to_status(err: &ListingError) -> StatusCode {
    match err {
        ListingError::NotFound(_) => StatusCode::NOT_FOUND,
        ListingError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
    }
}

#[derive(Serialize)]
pub struct CreditsResponse {
    pub credits: Vec<&'static CarbonCredit>,
    pub locations: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct ListingsResponse {
    pub listings: Vec<Listing>,
    pub stats: ListingStats,
}

/// `GET /api/marketplace/credits` — filtered catalog plus location options.
pub async fn credits(Query(query): Query<CreditQuery>) -> Json<CreditsResponse> {
    Json(CreditsResponse { credits: catalog::filter_credits(&query), locations: catalog::locations() })
}

/// `POST /api/estimator` — category and total emissions in tons CO2e.
pub async fn estimate(Json(input): Json<EstimatorInput>) -> Json<Emissions> {
    Json(estimator::estimate(&input))
}

/// `POST /carbon-estimator` — the estimator page with the form's result.
pub async fn estimate_form(visitor: Visitor, Form(form): Form<EstimatorForm>) -> Html<String> {
    let emissions = estimator::estimate(&EstimatorInput::from(form));
    debug!(total = emissions.total, "estimator form submitted");
    Html(render::render_page(&Page {
        path: "/carbon-estimator",
        decision: resolve_view("/carbon-estimator", visitor.identity()),
        context: &visitor.context,
        listings: None,
        auth_error: None,
        emissions: Some(&emissions),
    }))
}

/// `GET /api/listings` — the asset owner's listings. Stats always cover the
/// whole book, not just the filtered rows.
pub async fn list_listings(
    State(state): State<AppState>,
    owner: AssetOwner,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingsResponse>, StatusCode> {
    let result = state
        .sessions
        .with_session(&owner.token, |entry| -> Result<ListingsResponse, ListingError> {
            let listings = entry.listings.filter(&query)?.into_iter().cloned().collect();
            Ok(ListingsResponse { listings, stats: entry.listings.stats() })
        })
        .await
        .ok_or(StatusCode::FORBIDDEN)?;

    result.map(Json).map_err(|e| listing_error_to_status(&e))
}

/// `DELETE /api/listings/{id}`
pub async fn delete_listing(
    State(state): State<AppState>,
    owner: AssetOwner,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let removed = state
        .sessions
        .with_session(&owner.token, |entry| entry.listings.delete(&id))
        .await
        .ok_or(StatusCode::FORBIDDEN)?
        .map_err(|e| listing_error_to_status(&e))?;

    info!(listing_id = %removed.id, owner = %owner.identity.id, "listing deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "market_test.rs"]
mod tests;
