//! Social Feed Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub text: String,
    pub image: Option<String>,
    pub location: Option<String>,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: Option<String>,
    pub restaurant_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub text: String,
    pub image: Option<String>,
    pub location: Option<String>,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: Option<String>,
    pub restaurant_address: Option<String>,
}

/// Comment with its author's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Create comment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub text: String,
}

/// Post as rendered in the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithDetails {
    #[serde(flatten)]
    pub post: Post,
    pub author_name: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub is_liked: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Like toggle result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    pub is_liked: bool,
    pub likes_count: i64,
}

/// Feed pagination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
