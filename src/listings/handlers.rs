use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, repo::User},
    error::ApiError,
    listings::{
        dto::{Ack, CreateListingRequest, ListingView, SearchParams, SetStatusRequest},
        repo_types::Listing,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(search_listings))
        .route("/listings/mine", get(my_listings))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/listings/new", post(create_listing))
        .route("/listings/:id", delete(delete_listing))
        .route("/listings/:id/status", put(set_status))
}

#[instrument(skip(state, payload))]
pub async fn create_listing(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<ListingView>), ApiError> {
    let listing = Listing::create(&state.db, user_id, &payload).await?;

    let owner = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    info!(listing_id = %listing.id, user_id = %user_id, "listing created");
    Ok((
        StatusCode::CREATED,
        Json(ListingView::with_owner(listing, &owner)),
    ))
}

/// Public endpoint: no access gate, always restricted to available listings.
#[instrument(skip(state))]
pub async fn search_listings(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    let rows = Listing::search(&state.db, &params).await?;
    Ok(Json(rows.into_iter().map(ListingView::from).collect()))
}

#[instrument(skip(state))]
pub async fn my_listings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    let rows = Listing::list_by_owner(&state.db, user_id).await?;
    Ok(Json(rows.into_iter().map(ListingView::from).collect()))
}

/// Ownership gate for mutating operations: the listing must belong to the
/// caller or nothing below this check runs.
fn ensure_owner(listing: &Listing, user_id: Uuid) -> Result<(), ApiError> {
    if listing.user_id != user_id {
        warn!(listing_id = %listing.id, user_id = %user_id, owner = %listing.user_id, "ownership check failed");
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

/// Load the listing and check it belongs to the caller.
async fn owned_listing(
    state: &AppState,
    user_id: Uuid,
    listing_id: Uuid,
) -> Result<Listing, ApiError> {
    let listing = Listing::find_by_id(&state.db, listing_id)
        .await?
        .ok_or(ApiError::NotFound("Listing"))?;
    ensure_owner(&listing, user_id)?;
    Ok(listing)
}

#[instrument(skip(state))]
pub async fn delete_listing(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    let listing = owned_listing(&state, user_id, id).await?;

    // Stored images are left in place on purpose.
    Listing::delete(&state.db, listing.id).await?;

    info!(listing_id = %id, user_id = %user_id, "listing deleted");
    Ok(Json(Ack {
        message: "Deleted successfully",
    }))
}

#[instrument(skip(state, payload))]
pub async fn set_status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<Ack>, ApiError> {
    let listing = owned_listing(&state, user_id, id).await?;

    Listing::set_status(&state.db, listing.id, payload.status).await?;

    info!(listing_id = %id, user_id = %user_id, status = ?payload.status, "listing status updated");
    Ok(Json(Ack {
        message: "Updated successfully",
    }))
}
