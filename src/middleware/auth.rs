use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::auth;
use crate::database::manager::DatabaseManager;
use crate::database::models::user::User;
use crate::error::ApiError;

/// Authenticated identity carried through request context. Handlers receive
/// it as an extractor argument instead of reading any ambient global state.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Admin guard for mutation endpoints. Extraction runs before the body is
/// touched, so an unauthenticated request is rejected with 401 regardless
/// of payload validity.
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticate(&parts.headers).await?;
        if !user.is_admin() {
            return Err(ApiError::unauthorized("Unauthorized"));
        }
        Ok(AdminUser(AuthUser::from(&user)))
    }
}

/// Resolve the request's token to a live user row: verify signature and
/// expiry, then confirm the referenced user still exists. Shared by the
/// admin guard and `/api/auth/verify`.
pub async fn authenticate(headers: &HeaderMap) -> Result<User, ApiError> {
    let token = extract_token(headers)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let claims =
        auth::decode_jwt(&token).map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    let pool = DatabaseManager::pool().await?;
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(claims.user_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    Ok(user)
}

/// Bearer token from the Authorization header, falling back to the
/// `auth-token` cookie the browser client sets.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(value) = auth_header.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    let cookies = headers.get("cookie")?.to_str().ok()?;
    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some("auth-token") {
            let value = parts.next()?.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
