//! Social feed API Handlers

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Comment, CommentCreate, LikeResponse, PostCreate, PostQuery, PostWithDetails,
};

use crate::api::ApiResult;
use crate::api::upload::store_upload;
use crate::auth::CurrentUser;
use crate::db::{self, posts::PostRow};
use crate::media::{POSTS_FOLDER, UploadedImage};
use crate::state::AppState;
use crate::util::page;

fn post_not_found() -> AppError {
    AppError::new(ErrorCode::PostNotFound)
}

fn require_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "Text is required"));
    }
    Ok(())
}

fn into_details(row: PostRow, comments: Vec<Comment>) -> PostWithDetails {
    PostWithDetails {
        post: row.post,
        author_name: row.author_name,
        likes_count: row.likes_count,
        comments_count: row.comments_count,
        is_liked: row.is_liked,
        comments,
    }
}

async fn ensure_post_exists(state: &AppState, id: i64) -> Result<shared::models::Post, AppError> {
    db::posts::find_post(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(post_not_found)
}

/// POST /api/posts
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<PostCreate>,
) -> ApiResult<(StatusCode, Json<PostWithDetails>)> {
    require_text(&payload.text)?;

    let post = db::posts::create(&state.pool, user.id, &payload)
        .await
        .map_err(|e| state.internal(e))?;
    let row = db::posts::find_row(&state.pool, user.id, post.id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(post_not_found)?;

    tracing::info!(post_id = post.id, author_id = user.id, "Post created");
    Ok((StatusCode::CREATED, Json(into_details(row, Vec::new()))))
}

/// GET /api/posts
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PostQuery>,
) -> ApiResult<Json<Vec<PostWithDetails>>> {
    let (limit, offset) = page(query.limit, query.offset, 20);
    let rows = db::posts::list(&state.pool, user.id, limit, offset)
        .await
        .map_err(|e| state.internal(e))?;

    let ids: Vec<i64> = rows.iter().map(|r| r.post.id).collect();
    let mut comments = db::posts::comments_for(&state.pool, &ids)
        .await
        .map_err(|e| state.internal(e))?;

    let posts = rows
        .into_iter()
        .map(|row| {
            let c = comments.remove(&row.post.id).unwrap_or_default();
            into_details(row, c)
        })
        .collect();
    Ok(Json(posts))
}

/// GET /api/posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PostWithDetails>> {
    let row = db::posts::find_row(&state.pool, user.id, id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(post_not_found)?;
    let mut comments = db::posts::comments_for(&state.pool, &[id])
        .await
        .map_err(|e| state.internal(e))?;

    Ok(Json(into_details(row, comments.remove(&id).unwrap_or_default())))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let post = ensure_post_exists(&state, id).await?;
    if post.author_id != user.id && !user.is_admin() {
        return Err(AppError::not_owner("You can only delete your own posts"));
    }

    db::posts::delete(&state.pool, id)
        .await
        .map_err(|e| state.internal(e))?;

    if let Some(image) = post.image.as_deref() {
        state.images.delete_by_url(image).await;
    }

    tracing::info!(post_id = id, user_id = user.id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<LikeResponse>> {
    ensure_post_exists(&state, id).await?;

    let (is_liked, likes_count) = db::posts::toggle_like(&state.pool, id, user.id)
        .await
        .map_err(|e| state.internal(e))?;

    Ok(Json(LikeResponse {
        success: true,
        is_liked,
        likes_count,
    }))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<CommentCreate>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    require_text(&payload.text)?;
    ensure_post_exists(&state, id).await?;

    let comment = db::posts::add_comment(&state.pool, id, user.id, payload.text.trim())
        .await
        .map_err(|e| state.internal(e))?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/posts/{id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, comment_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    let (post_id, author_id) = db::posts::find_comment(&state.pool, comment_id)
        .await
        .map_err(|e| state.internal(e))?
        .filter(|(post_id, _)| *post_id == id)
        .ok_or_else(|| AppError::new(ErrorCode::CommentNotFound))?;

    if author_id != user.id && !user.is_admin() {
        return Err(AppError::not_owner("You can only delete your own comments"));
    }

    db::posts::delete_comment(&state.pool, comment_id)
        .await
        .map_err(|e| state.internal(e))?;

    tracing::debug!(post_id, comment_id, user_id = user.id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/upload-image
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    multipart: Multipart,
) -> ApiResult<Json<UploadedImage>> {
    Ok(Json(store_upload(&state, POSTS_FOLDER, multipart).await?))
}
