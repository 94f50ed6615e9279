use super::*;
use crate::gate::Role;
use crate::state::test_helpers::{seed_session, test_app_state};

async fn owner(state: &AppState) -> AssetOwner {
    let token = seed_session(state, Role::AssetOwner).await;
    let identity = state.sessions.context(&token).await.unwrap().identity().cloned().unwrap();
    AssetOwner { token, identity }
}

fn listing_query(search: Option<&str>, status: Option<&str>) -> Query<ListingQuery> {
    Query(ListingQuery { search: search.map(str::to_owned), status: status.map(str::to_owned) })
}

#[test]
fn listing_error_status_mapping() {
    assert_eq!(listing_error_to_status(&ListingError::NotFound("9".into())), StatusCode::NOT_FOUND);
    assert_eq!(listing_error_to_status(&ListingError::InvalidStatus("x".into())), StatusCode::BAD_REQUEST);
}

// =============================================================================
// catalog + estimator
// =============================================================================

#[tokio::test]
async fn credits_filters_and_lists_locations() {
    let Json(all) = credits(Query(CreditQuery::default())).await;
    assert_eq!(all.credits.len(), 6);
    assert_eq!(all.locations.len(), 6);

    let query = CreditQuery { kind: Some("technology".into()), ..CreditQuery::default() };
    let Json(tech) = credits(Query(query)).await;
    assert!(!tech.credits.is_empty());
    assert!(tech.credits.iter().all(|c| c.kind == "Technology-based"));
    assert_eq!(tech.locations.len(), 6, "location options never shrink with filters");
}

#[tokio::test]
async fn estimate_accepts_mixed_json_readings() {
    let input: EstimatorInput = serde_json::from_value(serde_json::json!({
        "transportation": { "distance": 100, "fuelConsumption": "10", "trips": 20 },
        "operations": { "employees": "4", "businessTravel": "bogus" }
    }))
    .unwrap();
    let Json(out) = estimate(Json(input)).await;
    assert!((out.transportation - 46.0).abs() < 1e-9);
    assert!((out.operations - 10.0).abs() < 1e-9);
    assert!((out.total - 56.0).abs() < 1e-9);
}

#[tokio::test]
async fn estimate_form_renders_result_on_estimator_page() {
    let visitor = Visitor { token: None, context: crate::gate::SessionContext::new() };
    let form = EstimatorForm { general: "10".into(), organic: "5".into(), ..EstimatorForm::default() };
    let Html(html) = estimate_form(visitor, Form(form)).await;
    assert!(html.contains(r#"data-view="carbon-estimator""#));
    assert!(html.contains("<dt>Waste</dt><dd>11.00 t CO2</dd>"));
    assert!(html.contains("<dt>Total</dt><dd>11.00 t CO2</dd>"));
}

// =============================================================================
// listings
// =============================================================================

#[tokio::test]
async fn list_listings_returns_seeded_book() {
    let state = test_app_state();
    let owner = owner(&state).await;
    let Json(resp) = list_listings(State(state.clone()), owner, listing_query(None, None)).await.unwrap();
    assert_eq!(resp.listings.len(), 3);
    assert_eq!(resp.stats.total_views, 2773);
    assert_eq!(resp.stats.total_inquiries, 53);
}

#[tokio::test]
async fn list_listings_filter_keeps_full_stats() {
    let state = test_app_state();
    let owner = owner(&state).await;
    let Json(resp) = list_listings(State(state.clone()), owner, listing_query(None, Some("pending")))
        .await
        .unwrap();
    assert_eq!(resp.listings.len(), 1);
    assert_eq!(resp.listings[0].title, "Urban Forest Initiative");
    assert_eq!(resp.stats.total, 3);
}

#[tokio::test]
async fn list_listings_rejects_unknown_status() {
    let state = test_app_state();
    let owner = owner(&state).await;
    let err = list_listings(State(state.clone()), owner, listing_query(None, Some("archived")))
        .await
        .err();
    assert_eq!(err, Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn delete_listing_removes_once() {
    let state = test_app_state();
    let first = owner(&state).await;
    let token = first.token.clone();
    let identity = first.identity.clone();

    let status = delete_listing(State(state.clone()), first, Path("2".into())).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let again = AssetOwner { token: token.clone(), identity };
    let err = delete_listing(State(state.clone()), again, Path("2".into())).await.err();
    assert_eq!(err, Some(StatusCode::NOT_FOUND));

    let remaining = state.sessions.with_session(&token, |e| e.listings.stats().total).await;
    assert_eq!(remaining, Some(2));
}

#[tokio::test]
async fn listings_are_per_session() {
    let state = test_app_state();
    let a = owner(&state).await;
    let b = owner(&state).await;
    let b_token = b.token.clone();

    delete_listing(State(state.clone()), a, Path("1".into())).await.unwrap();
    let Json(resp) = list_listings(State(state.clone()), b, listing_query(None, None)).await.unwrap();
    assert_eq!(resp.listings.len(), 3);
    assert!(state.sessions.contains(&b_token).await);
}

#[tokio::test]
async fn expired_session_is_forbidden() {
    let state = test_app_state();
    let mut owner = owner(&state).await;
    owner.token = "no-longer-live".to_owned();
    let err = list_listings(State(state.clone()), owner, listing_query(None, None)).await.err();
    assert_eq!(err, Some(StatusCode::FORBIDDEN));
}
