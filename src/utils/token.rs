use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;

pub fn create_access_token(email: &str) -> Result<String> {
    let config = crate::config::get_config();
    let expires_at = Utc::now() + Duration::minutes(config.access_token_expire_minutes);
    let claims = Claims {
        sub: email.to_string(),
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to issue access token: {}", e)))
}
