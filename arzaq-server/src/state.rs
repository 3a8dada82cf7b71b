//! Application state

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use shared::error::{AppError, ErrorCode};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::rate_limit::RateLimiter;
use crate::config::Config;
use crate::media::ImageStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Picture hosting
    pub images: ImageStore,
    /// Outbound HTTP (Google userinfo)
    pub http: reqwest::Client,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Create a new AppState: connect, migrate, load AWS config
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let s3 = S3Client::new(&aws_config);

        Ok(Self::from_parts(config, pool, s3))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(config: Config, pool: PgPool, s3: S3Client) -> Self {
        let images = ImageStore::new(
            s3,
            config.image_bucket.clone(),
            config.image_public_base_url.clone(),
        );
        Self {
            pool,
            config: Arc::new(config),
            images,
            http: reqwest::Client::new(),
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Log a storage failure and turn it into a client-facing error.
    ///
    /// The underlying message is only exposed in development.
    pub fn internal(&self, e: impl std::fmt::Display) -> AppError {
        tracing::error!(error = %e, "Storage error");
        let err = AppError::new(ErrorCode::InternalError);
        if self.config.is_development() {
            err.with_detail("error", e.to_string())
        } else {
            err
        }
    }
}
