use axum::extract::{Path, Query};
use serde::Deserialize;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::inquiry::{
    Inquiry, InquiryInput, InquiryStatusUpdate, INQUIRY_SORT_COLUMNS,
};
use crate::database::query_builder::fetch_page;
use crate::error::ApiError;
use crate::listing::{ListingQuery, PageParams};
use crate::middleware::{AdminUser, ApiJson, ApiResponse, ApiResult};

use super::parse_id;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub inquiry_type: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// GET /api/inquiries (admin)
pub async fn list(_admin: AdminUser, Query(q): Query<InquiryListQuery>) -> ApiResult<Vec<Inquiry>> {
    let pool = DatabaseManager::pool().await?;
    let page = PageParams::resolve(
        q.page.as_deref(),
        q.limit.as_deref(),
        config::config().pagination.inquiry_limit,
    );

    let query = ListingQuery::new("inquiries", page)
        .eq("status", q.status.as_deref())
        .eq("inquiry_type", q.inquiry_type.as_deref())
        .sort(q.sort_by.as_deref(), q.sort_order.as_deref(), INQUIRY_SORT_COLUMNS);

    let (inquiries, pagination) = fetch_page::<Inquiry>(&pool, &query).await?;
    Ok(ApiResponse::paginated(inquiries, pagination))
}

/// POST /api/inquiries — the public contact form; no authentication.
pub async fn create(ApiJson(input): ApiJson<InquiryInput>) -> ApiResult<Inquiry> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let inquiry_type = input.resolved_type().to_string();
    let pool = DatabaseManager::pool().await?;
    let inquiry = sqlx::query_as::<_, Inquiry>(
        "INSERT INTO inquiries \
           (name, email, phone, message, property_id, property_title, inquiry_type) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING *",
    )
    .bind(input.name)
    .bind(input.email)
    .bind(input.phone)
    .bind(input.message)
    .bind(input.property_id)
    .bind(input.property_title)
    .bind(inquiry_type)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created(inquiry).with_message("Inquiry submitted successfully"))
}

/// PUT /api/inquiries/:id (admin) — status is the only mutable field.
pub async fn update_status(
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<InquiryStatusUpdate>,
) -> ApiResult<Inquiry> {
    let id = parse_id(&id, "Invalid inquiry ID")?;
    let errors = update.validate();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let pool = DatabaseManager::pool().await?;
    let inquiry = sqlx::query_as::<_, Inquiry>(
        "UPDATE inquiries SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(update.status)
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Inquiry not found"))?;

    Ok(ApiResponse::success(inquiry).with_message("Inquiry status updated"))
}

/// DELETE /api/inquiries/:id (admin)
pub async fn delete(_admin: AdminUser, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id, "Invalid inquiry ID")?;
    let pool = DatabaseManager::pool().await?;

    let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Inquiry not found"));
    }

    Ok(ApiResponse::<()>::message("Inquiry deleted successfully"))
}
