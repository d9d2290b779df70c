use sqlx::PgPool;

use crate::dto::auth_dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::create_access_token;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<TokenResponse> {
        let existing = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM users WHERE email = $1"#,
        )
        .bind(&payload.email)
        .fetch_one(&self.pool)
        .await?;

        if existing > 0 {
            return Err(Error::BadRequest("Email already registered".to_string()));
        }

        let hashed = hash_password(&payload.password)?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, full_name, hashed_password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&payload.email)
        .bind(&payload.full_name)
        .bind(&hashed)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Registered new user {}", user.email);
        self.token_response(user)
    }

    pub async fn login(&self, payload: LoginRequest) -> Result<TokenResponse> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(user) = user else {
            return Err(Error::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        };

        if !verify_password(&payload.password, &user.hashed_password)? {
            return Err(Error::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }

        self.token_response(user)
    }

    /// Resolves verified bearer claims to the user row they identify.
    /// A token whose subject no longer exists (or was deactivated) is
    /// rejected, never treated as an anonymous caller.
    pub async fn require_user(&self, claims: &Claims) -> Result<User> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(&claims.sub)
            .fetch_optional(&self.pool)
            .await?;

        match user {
            Some(user) if user.is_active => Ok(user),
            _ => Err(Error::Unauthorized(
                "Could not validate credentials".to_string(),
            )),
        }
    }

    fn token_response(&self, user: User) -> Result<TokenResponse> {
        let access_token = create_access_token(&user.email)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: UserResponse::from(user),
        })
    }
}
