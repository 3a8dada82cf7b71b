use std::collections::HashMap;

use shared::models::{Comment, Post, PostCreate};
use sqlx::PgPool;

/// Feed row: post plus author name, counters and the viewer's like flag
#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    #[sqlx(flatten)]
    pub post: Post,
    pub author_name: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub is_liked: bool,
}

const FEED_SELECT: &str = r#"
    SELECT p.*,
           u.full_name AS author_name,
           (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes_count,
           (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comments_count,
           EXISTS (SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = $1) AS is_liked
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

pub async fn create(pool: &PgPool, author_id: i64, data: &PostCreate) -> Result<Post, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO posts (author_id, text, image, location, restaurant_id, restaurant_name, restaurant_address)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(author_id)
    .bind(&data.text)
    .bind(&data.image)
    .bind(&data.location)
    .bind(data.restaurant_id)
    .bind(&data.restaurant_name)
    .bind(&data.restaurant_address)
    .fetch_one(pool)
    .await
}

pub async fn find_post(pool: &PgPool, id: i64) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Newest first, as seen by `viewer_id`
pub async fn list(
    pool: &PgPool,
    viewer_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRow>, sqlx::Error> {
    let sql = format!("{FEED_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3");
    sqlx::query_as(&sql)
        .bind(viewer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

pub async fn find_row(pool: &PgPool, viewer_id: i64, id: i64) -> Result<Option<PostRow>, sqlx::Error> {
    let sql = format!("{FEED_SELECT} WHERE p.id = $2");
    sqlx::query_as(&sql)
        .bind(viewer_id)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Comments for a set of posts, oldest first, grouped by post id
pub async fn comments_for(
    pool: &PgPool,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<Comment>>, sqlx::Error> {
    let mut grouped: HashMap<i64, Vec<Comment>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(grouped);
    }
    let rows: Vec<Comment> = sqlx::query_as(
        r#"
        SELECT c.id, c.post_id, c.author_id, u.full_name AS author_name, c.text, c.created_at
        FROM post_comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = ANY($1)
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;
    for comment in rows {
        grouped.entry(comment.post_id).or_default().push(comment);
    }
    Ok(grouped)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Flip the user's like on a post. Returns `(is_liked, likes_count)`.
pub async fn toggle_like(pool: &PgPool, post_id: i64, user_id: i64) -> Result<(bool, i64), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        sqlx::query(
            "INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT unique_post_like DO NOTHING",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok((removed == 0, count))
}

pub async fn add_comment(
    pool: &PgPool,
    post_id: i64,
    author_id: i64,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as(
        r#"
        WITH inserted AS (
            INSERT INTO post_comments (post_id, author_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, author_id, text, created_at
        )
        SELECT i.id, i.post_id, i.author_id, u.full_name AS author_name, i.text, i.created_at
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await
}

/// `(post_id, author_id)` of a comment
pub async fn find_comment(pool: &PgPool, id: i64) -> Result<Option<(i64, i64)>, sqlx::Error> {
    sqlx::query_as("SELECT post_id, author_id FROM post_comments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete_comment(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
