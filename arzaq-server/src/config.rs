//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Pool size
    pub database_max_connections: u32,
    pub http_host: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for access tokens
    pub jwt_secret: String,
    /// Access token lifetime (default one week)
    pub access_token_expire_minutes: i64,
    /// CORS origins
    pub allowed_origins: Vec<String>,
    /// S3 bucket for uploaded pictures
    pub image_bucket: String,
    /// Public base URL the bucket is served from (CDN or S3 website)
    pub image_public_base_url: String,
    /// Endpoint used to verify Google access tokens
    pub google_userinfo_url: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: parse_or("HTTP_PORT", 8000),
            environment: environment.clone(),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            access_token_expire_minutes: parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", 10080),
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.into()),
            ),
            image_bucket: std::env::var("IMAGE_BUCKET").unwrap_or_else(|_| "arzaq-images".into()),
            image_public_base_url: std::env::var("IMAGE_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "https://arzaq-images.s3.amazonaws.com".into())
                .trim_end_matches('/')
                .to_string(),
            google_userinfo_url: std::env::var("GOOGLE_USERINFO_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_USERINFO_URL.into()),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Development configuration with defaults and no environment lookups
    pub fn local(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_max_connections: 5,
            http_host: "127.0.0.1".into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            access_token_expire_minutes: 60,
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            image_bucket: "arzaq-images".into(),
            image_public_base_url: "http://localhost:9000/arzaq-images".into(),
            google_userinfo_url: DEFAULT_GOOGLE_USERINFO_URL.into(),
        }
    }
}
