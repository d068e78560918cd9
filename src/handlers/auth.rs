use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::auth::{generate_jwt, hash_password, verify_password, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::models::user::{User, ROLE_ADMIN};
use crate::error::ApiError;
use crate::middleware::{authenticate, ApiJson, ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(ApiJson(req): ApiJson<LoginRequest>) -> ApiResult<Value> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let pool = DatabaseManager::pool().await?;
    let email = req.email.trim().to_lowercase();

    // A missing account and a wrong password answer identically.
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let matches = verify_password(&req.password, &user.password).map_err(|e| {
        error!("Password verification failed: {}", e);
        ApiError::internal("Internal server error")
    })?;
    if !matches {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await?;

    let claims = Claims::new(user.id, user.email.clone(), user.role.clone());
    let token = generate_jwt(&claims).map_err(|e| {
        error!("Token generation failed: {}", e);
        ApiError::internal("Internal server error")
    })?;

    info!("User {} logged in", user.email);
    Ok(ApiResponse::success(json!({ "token": token, "user": user })))
}

/// GET /api/auth/verify — resolve the presented token back to its user so
/// the client can restore a session.
pub async fn verify(headers: HeaderMap) -> ApiResult<Value> {
    let user = authenticate(&headers).await?;
    Ok(ApiResponse::success(json!({ "user": user })))
}

#[derive(Debug, Deserialize)]
pub struct SetupAdminRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub name: String,
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

/// POST /api/setup/admin — one-shot bootstrap. Refuses once any admin
/// exists; after that, accounts are managed by the admin themselves.
pub async fn setup_admin(ApiJson(req): ApiJson<SetupAdminRequest>) -> ApiResult<User> {
    let mut errors = Vec::new();
    if req.email.trim().is_empty() || !req.email.contains('@') {
        errors.push("A valid email is required".to_string());
    }
    if req.password.len() < 8 {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let pool = DatabaseManager::pool().await?;
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(ROLE_ADMIN)
        .fetch_one(&pool)
        .await?;
    if admins > 0 {
        return Err(ApiError::conflict("Admin user already exists"));
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        ApiError::internal("Internal server error")
    })?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password, name, role) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(req.email.trim().to_lowercase())
    .bind(hashed)
    .bind(req.name)
    .bind(ROLE_ADMIN)
    .fetch_one(&pool)
    .await?;

    info!("Admin user {} created via setup", user.email);
    Ok(ApiResponse::created(user).with_message("Admin user created"))
}
