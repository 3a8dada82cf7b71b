//! Shared utility functions

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Lowercased, trimmed email used for lookups and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Clamp `limit`/`offset` query values (limit 1..=100, offset >= 0)
pub fn page(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> (i64, i64) {
    let limit = limit.unwrap_or(default_limit).clamp(1, 100);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}
