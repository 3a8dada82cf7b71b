//! Order API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use shared::error::{AppError, ErrorCode};
use shared::models::{ImpactStats, Order, OrderCreate, OrderStatusUpdate, OrderWithItems, Role};

use crate::api::ApiResult;
use crate::auth::{CurrentUser, authorize};
use crate::db;
use crate::state::AppState;

/// Restaurant id owned by a RESTAURANT caller, if they have registered one
async fn own_restaurant_id(state: &AppState, user: &CurrentUser) -> Result<Option<i64>, AppError> {
    let restaurant = db::restaurants::find_by_owner(&state.pool, user.id)
        .await
        .map_err(|e| state.internal(e))?;
    Ok(restaurant.map(|r| r.id))
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<(StatusCode, Json<OrderWithItems>)> {
    authorize(&user, &[Role::Client])?;

    let order = db::orders::place_order(&state.pool, user.id, &payload)
        .await
        .map_err(|e| e.into_app_error(state.config.is_development()))?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<OrderWithItems>>> {
    let orders = match user.role {
        Role::Client => db::orders::list_for_customer(&state.pool, user.id).await,
        Role::Restaurant => match own_restaurant_id(&state, &user).await? {
            Some(restaurant_id) => db::orders::list_for_restaurant(&state.pool, restaurant_id).await,
            None => Ok(Vec::new()),
        },
        Role::Admin => db::orders::list_all(&state.pool).await,
    }
    .map_err(|e| state.internal(e))?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<OrderWithItems>> {
    let order = db::orders::find(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    match user.role {
        Role::Client if order.order.customer_id != user.id => {
            return Err(AppError::not_owner("You can only view your own orders"));
        }
        Role::Restaurant => {
            let restaurant_id = own_restaurant_id(&state, &user).await?;
            if restaurant_id != Some(order.order.restaurant_id) {
                return Err(AppError::not_owner(
                    "You can only view orders for your restaurant",
                ));
            }
        }
        _ => {}
    }

    Ok(Json(order))
}

/// PATCH /api/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> ApiResult<Json<Order>> {
    authorize(&user, &[Role::Restaurant])?;

    let existing = db::orders::find(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let restaurant_id = existing.order.restaurant_id;
    if own_restaurant_id(&state, &user).await? != Some(restaurant_id) {
        return Err(AppError::not_owner(
            "You can only update orders for your restaurant",
        ));
    }

    let order = db::orders::update_status(&state.pool, id, payload.status)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    tracing::info!(
        order_id = id,
        restaurant_id,
        from = ?existing.order.status,
        to = ?order.status,
        "Order status changed"
    );
    Ok(Json(order))
}

/// GET /api/orders/impact/stats
pub async fn impact_stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<ImpactStats>> {
    authorize(&user, &[Role::Client])?;
    let meals = db::orders::meals_rescued(&state.pool, user.id)
        .await
        .map_err(|e| state.internal(e))?;
    Ok(Json(shared::order::impact_stats(meals)))
}
