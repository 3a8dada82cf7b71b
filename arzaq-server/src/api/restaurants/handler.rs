//! Restaurant API Handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Restaurant, RestaurantCreate, RestaurantQuery, RestaurantReject, RestaurantStatus,
    RestaurantUpdate, Role,
};
use shared::validation::validate_coordinates;

use crate::api::ApiResult;
use crate::auth::{CurrentUser, authorize};
use crate::db::{self, restaurants::NearFilter};
use crate::state::AppState;
use crate::util::page;

/// Kilometres per degree, used for the bounding-box radius filter
const KM_PER_DEGREE: f64 = 111.0;
const DEFAULT_RADIUS_KM: f64 = 10.0;
const MIN_RADIUS_KM: f64 = 1.0;
const MAX_RADIUS_KM: f64 = 50.0;

/// Bounding box for an optional point + radius query
fn near_filter(query: &RestaurantQuery) -> Result<Option<NearFilter>, AppError> {
    let (Some(latitude), Some(longitude)) = (query.latitude, query.longitude) else {
        return Ok(None);
    };
    validate_coordinates(latitude, longitude)?;

    let radius = query.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "Radius must be between 1 and 50 km",
        ));
    }

    Ok(Some(NearFilter {
        latitude,
        longitude,
        degrees: radius / KM_PER_DEGREE,
    }))
}

fn not_found() -> AppError {
    AppError::new(ErrorCode::RestaurantNotFound)
}

/// POST /api/restaurants
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RestaurantCreate>,
) -> ApiResult<(StatusCode, Json<Restaurant>)> {
    authorize(&user, &[Role::Restaurant])?;
    validate_coordinates(payload.latitude, payload.longitude)?;

    let restaurant = db::restaurants::create(&state.pool, user.id, &payload)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantAlreadyExists))?;

    tracing::info!(restaurant_id = restaurant.id, owner_id = user.id, "Restaurant registered");
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// GET /api/restaurants
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> ApiResult<Json<Vec<Restaurant>>> {
    let near = near_filter(&query)?;
    let (limit, offset) = page(query.limit, query.offset, 100);
    let status = query.status.unwrap_or(RestaurantStatus::Approved);

    let restaurants = db::restaurants::list(&state.pool, status, near, limit, offset)
        .await
        .map_err(|e| state.internal(e))?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/pending
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Restaurant>>> {
    authorize(&user, &[Role::Admin])?;
    let restaurants = db::restaurants::list_pending(&state.pool)
        .await
        .map_err(|e| state.internal(e))?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/me
pub async fn get_mine(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Restaurant>> {
    authorize(&user, &[Role::Restaurant])?;
    let restaurant = db::restaurants::find_by_owner(&state.pool, user.id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(not_found)?;
    Ok(Json(restaurant))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Restaurant>> {
    let restaurant = db::restaurants::find_by_id(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(not_found)?;
    Ok(Json(restaurant))
}

/// PUT /api/restaurants/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> ApiResult<Json<Restaurant>> {
    authorize(&user, &[Role::Restaurant])?;
    if payload.latitude.is_some() || payload.longitude.is_some() {
        validate_coordinates(
            payload.latitude.unwrap_or_default(),
            payload.longitude.unwrap_or_default(),
        )?;
    }

    let restaurant = db::restaurants::update(&state.pool, id, user.id, &payload)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RestaurantNotFound,
                "Restaurant not found or you don't have permission",
            )
        })?;
    Ok(Json(restaurant))
}

/// Distinguish a missing restaurant from one that was already decided
async fn decision_failure(state: &AppState, id: i64) -> AppError {
    match db::restaurants::find_by_id(&state.pool, id).await {
        Ok(Some(_)) => AppError::new(ErrorCode::RestaurantNotPending),
        Ok(None) => not_found(),
        Err(e) => state.internal(e),
    }
}

/// POST /api/restaurants/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Restaurant>> {
    authorize(&user, &[Role::Admin])?;
    let Some(restaurant) = db::restaurants::approve(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?
    else {
        return Err(decision_failure(&state, id).await);
    };

    tracing::info!(restaurant_id = id, admin_id = user.id, "Restaurant approved");
    Ok(Json(restaurant))
}

/// POST /api/restaurants/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantReject>,
) -> ApiResult<Json<Restaurant>> {
    authorize(&user, &[Role::Admin])?;
    let Some(restaurant) = db::restaurants::reject(&state.pool, id, &payload.reason)
        .await
        .map_err(|e| state.internal(e))?
    else {
        return Err(decision_failure(&state, id).await);
    };

    tracing::info!(restaurant_id = id, admin_id = user.id, "Restaurant rejected");
    Ok(Json(restaurant))
}

/// DELETE /api/restaurants/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let restaurant = db::restaurants::find_by_id(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(not_found)?;

    if !user.is_admin() && restaurant.owner_id != user.id {
        return Err(AppError::not_owner("Not enough permissions"));
    }

    db::restaurants::delete(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?;

    tracing::info!(restaurant_id = id, user_id = user.id, "Restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}
