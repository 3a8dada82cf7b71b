//! Food listing API Handlers

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Food, FoodCreate, FoodQuery, FoodUpdate, FoodWithRestaurant, RestaurantStatus, Role,
};
use shared::validation::{discount_percent, validate_expiration, validate_prices, validate_quantity};

use crate::api::ApiResult;
use crate::api::upload::store_upload;
use crate::auth::{CurrentUser, authorize};
use crate::db::{self, FOREIGN_KEY_VIOLATION, is_constraint};
use crate::media::{FOODS_FOLDER, UploadedImage};
use crate::state::AppState;
use crate::util::page;

async fn find_food(state: &AppState, id: i64) -> Result<Food, AppError> {
    db::foods::find_by_id(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::FoodNotFound))
}

/// Fail with `denied` unless the caller owns `restaurant_id`
async fn require_owner(
    state: &AppState,
    user: &CurrentUser,
    restaurant_id: i64,
    denied: &str,
) -> Result<(), AppError> {
    let restaurant = db::restaurants::find_by_owner(&state.pool, user.id)
        .await
        .map_err(|e| state.internal(e))?;
    match restaurant {
        Some(r) if r.id == restaurant_id => Ok(()),
        _ => Err(AppError::not_owner(denied)),
    }
}

/// Apply a partial update and re-check the merged listing
fn merge_update(food: &mut Food, update: FoodUpdate, now: chrono::DateTime<Utc>) -> Result<(), AppError> {
    let prices_changed = update.price.is_some() || update.old_price.is_some();
    let explicit_discount = update.discount.is_some();
    let expiry_changed = update.expires_at.is_some();

    update.apply_to(food);

    validate_prices(food.price, food.old_price)?;
    validate_quantity(food.quantity)?;
    if expiry_changed {
        validate_expiration(food.expires_at, now)?;
    }
    if prices_changed && !explicit_discount {
        food.discount = discount_percent(food.price, food.old_price);
    }
    Ok(())
}

/// POST /api/foods
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<FoodCreate>,
) -> ApiResult<(StatusCode, Json<Food>)> {
    authorize(&user, &[Role::Restaurant])?;

    let restaurant = db::restaurants::find_by_id(&state.pool, payload.restaurant_id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    if restaurant.owner_id != user.id {
        return Err(AppError::not_owner(
            "You can only create food items for your own restaurant",
        ));
    }
    if restaurant.status != RestaurantStatus::Approved {
        return Err(AppError::new(ErrorCode::RestaurantNotApproved));
    }

    validate_prices(payload.price, payload.old_price)?;
    validate_expiration(payload.expires_at, Utc::now())?;
    validate_quantity(payload.quantity)?;
    let discount = payload
        .discount
        .or_else(|| discount_percent(payload.price, payload.old_price));

    let food = db::foods::create(&state.pool, &payload, discount)
        .await
        .map_err(|e| state.internal(e))?;

    tracing::info!(food_id = food.id, restaurant_id = food.restaurant_id, "Food listed");
    Ok((StatusCode::CREATED, Json(food)))
}

/// GET /api/foods
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FoodQuery>,
) -> ApiResult<Json<Vec<FoodWithRestaurant>>> {
    let (limit, offset) = page(query.limit, query.offset, 50);
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let foods = db::foods::list_available(
        &state.pool,
        query.restaurant_id,
        search,
        Utc::now(),
        limit,
        offset,
    )
    .await
    .map_err(|e| state.internal(e))?;
    Ok(Json(foods))
}

/// GET /api/foods/me
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Food>>> {
    authorize(&user, &[Role::Restaurant])?;
    let restaurant = db::restaurants::find_by_owner(&state.pool, user.id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let foods = db::foods::list_by_restaurant(&state.pool, restaurant.id)
        .await
        .map_err(|e| state.internal(e))?;
    Ok(Json(foods))
}

/// GET /api/foods/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Food>> {
    Ok(Json(find_food(&state, id).await?))
}

/// PUT /api/foods/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<FoodUpdate>,
) -> ApiResult<Json<Food>> {
    authorize(&user, &[Role::Restaurant])?;

    // Held until commit so a concurrent order cannot decrement stock in between
    let mut tx = state.pool.begin().await.map_err(|e| state.internal(e))?;
    let mut food = db::foods::find_for_update(&mut *tx, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::FoodNotFound))?;
    require_owner(
        &state,
        &user,
        food.restaurant_id,
        "You can only update your own food items",
    )
    .await?;

    merge_update(&mut food, payload, Utc::now())?;

    let food = db::foods::save(&mut *tx, &food)
        .await
        .map_err(|e| state.internal(e))?;
    tx.commit().await.map_err(|e| state.internal(e))?;
    Ok(Json(food))
}

/// DELETE /api/foods/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    authorize(&user, &[Role::Restaurant])?;
    let food = find_food(&state, id).await?;
    require_owner(
        &state,
        &user,
        food.restaurant_id,
        "You can only delete your own food items",
    )
    .await?;

    db::foods::delete(&state.pool, id).await.map_err(|e| {
        if is_constraint(&e, FOREIGN_KEY_VIOLATION) {
            AppError::new(ErrorCode::FoodHasOrders)
        } else {
            state.internal(e)
        }
    })?;

    if let Some(image) = food.image.as_deref() {
        state.images.delete_by_url(image).await;
    }

    tracing::info!(food_id = id, restaurant_id = food.restaurant_id, "Food deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/foods/upload-image
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> ApiResult<Json<UploadedImage>> {
    authorize(&user, &[Role::Restaurant])?;
    Ok(Json(store_upload(&state, FOODS_FOLDER, multipart).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn food() -> Food {
        let now = Utc::now();
        Food {
            id: 1,
            restaurant_id: 1,
            name: "Samsa".into(),
            description: None,
            image: None,
            price: 500.0,
            old_price: Some(800.0),
            discount: Some(38),
            quantity: 10,
            expires_at: now + Duration::days(1),
            created_at: now,
            updated_at: None,
        }
    }

    #[test]
    fn test_merge_recomputes_discount() {
        let mut f = food();
        let update = FoodUpdate {
            price: Some(400.0),
            ..Default::default()
        };
        merge_update(&mut f, update, Utc::now()).unwrap();
        assert_eq!(f.price, 400.0);
        assert_eq!(f.discount, Some(50));
    }

    #[test]
    fn test_merge_keeps_explicit_discount() {
        let mut f = food();
        let update = FoodUpdate {
            price: Some(400.0),
            discount: Some(45),
            ..Default::default()
        };
        merge_update(&mut f, update, Utc::now()).unwrap();
        assert_eq!(f.discount, Some(45));
    }

    #[test]
    fn test_merge_rejects_price_above_old_price() {
        let mut f = food();
        let update = FoodUpdate {
            price: Some(900.0),
            ..Default::default()
        };
        let err = merge_update(&mut f, update, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodInvalidPrice);
    }

    #[test]
    fn test_merge_rejects_past_expiry_and_negative_stock() {
        let mut f = food();
        let update = FoodUpdate {
            expires_at: Some(Utc::now() - Duration::hours(1)),
            ..Default::default()
        };
        let err = merge_update(&mut f, update, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodExpirationInPast);

        let mut f = food();
        let update = FoodUpdate {
            quantity: Some(-1),
            ..Default::default()
        };
        let err = merge_update(&mut f, update, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodInvalidQuantity);
    }

    #[test]
    fn test_merge_quantity_only() {
        let mut f = food();
        let update = FoodUpdate {
            quantity: Some(0),
            ..Default::default()
        };
        merge_update(&mut f, update, Utc::now()).unwrap();
        assert_eq!(f.quantity, 0);
        assert_eq!(f.discount, Some(38));
    }
}
