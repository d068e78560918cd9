use axum::extract::{Path, Query};
use serde::Deserialize;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::property::{Property, PropertyInput, PROPERTY_SORT_COLUMNS};
use crate::database::query_builder::fetch_page;
use crate::error::ApiError;
use crate::listing::{ListingQuery, PageParams};
use crate::middleware::{AdminUser, ApiJson, ApiResponse, ApiResult};

use super::parse_id;

/// Raw query string for the public listing. Everything is optional text;
/// parsing and defaulting happen in the listing builder.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub featured: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// GET /api/properties
pub async fn list(Query(q): Query<PropertyListQuery>) -> ApiResult<Vec<Property>> {
    let pool = DatabaseManager::pool().await?;
    let page = PageParams::resolve(
        q.page.as_deref(),
        q.limit.as_deref(),
        config::config().pagination.default_limit,
    );

    let query = ListingQuery::new("properties", page)
        .search(&["title", "description", "location"], q.search.as_deref())
        .eq("category", q.category.as_deref())
        .eq("status", q.status.as_deref())
        .ilike("location", q.location.as_deref())
        .range("price", q.min_price.as_deref(), q.max_price.as_deref())
        .rooms("bedrooms", q.bedrooms.as_deref())
        .rooms("bathrooms", q.bathrooms.as_deref())
        .flag_true("featured", q.featured.as_deref())
        .sort(q.sort_by.as_deref(), q.sort_order.as_deref(), PROPERTY_SORT_COLUMNS);

    let (properties, pagination) = fetch_page::<Property>(&pool, &query).await?;
    Ok(ApiResponse::paginated(properties, pagination))
}

/// GET /api/properties/:id — every read counts as a view.
pub async fn get(Path(id): Path<String>) -> ApiResult<Property> {
    let id = parse_id(&id, "Invalid property ID")?;
    let pool = DatabaseManager::pool().await?;

    let property = sqlx::query_as::<_, Property>(
        "UPDATE properties SET views = views + 1 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Property not found"))?;

    Ok(ApiResponse::success(property))
}

/// POST /api/properties (admin)
pub async fn create(
    _admin: AdminUser,
    ApiJson(input): ApiJson<PropertyInput>,
) -> ApiResult<Property> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let pool = DatabaseManager::pool().await?;
    let property = sqlx::query_as::<_, Property>(
        "INSERT INTO properties \
           (title, description, price, location, category, status, \
            bedrooms, bathrooms, area, year_built, parking, video, \
            images, features, amenities, furnished, pet_friendly, featured) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
         RETURNING *",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(input.price)
    .bind(input.location)
    .bind(input.category)
    .bind(input.status)
    .bind(input.bedrooms)
    .bind(input.bathrooms)
    .bind(input.area)
    .bind(input.year_built)
    .bind(input.parking)
    .bind(input.video)
    .bind(input.images)
    .bind(input.features)
    .bind(input.amenities)
    .bind(input.furnished)
    .bind(input.pet_friendly)
    .bind(input.featured)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created(property).with_message("Property created successfully"))
}

/// PUT /api/properties/:id (admin) — full replacement, same validation as
/// create. Views and timestamps are never client-settable.
pub async fn update(
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<PropertyInput>,
) -> ApiResult<Property> {
    let id = parse_id(&id, "Invalid property ID")?;
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let pool = DatabaseManager::pool().await?;
    let property = sqlx::query_as::<_, Property>(
        "UPDATE properties SET \
           title = $1, description = $2, price = $3, location = $4, \
           category = $5, status = $6, bedrooms = $7, bathrooms = $8, \
           area = $9, year_built = $10, parking = $11, video = $12, \
           images = $13, features = $14, amenities = $15, furnished = $16, \
           pet_friendly = $17, featured = $18, updated_at = now() \
         WHERE id = $19 \
         RETURNING *",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(input.price)
    .bind(input.location)
    .bind(input.category)
    .bind(input.status)
    .bind(input.bedrooms)
    .bind(input.bathrooms)
    .bind(input.area)
    .bind(input.year_built)
    .bind(input.parking)
    .bind(input.video)
    .bind(input.images)
    .bind(input.features)
    .bind(input.amenities)
    .bind(input.furnished)
    .bind(input.pet_friendly)
    .bind(input.featured)
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Property not found"))?;

    Ok(ApiResponse::success(property).with_message("Property updated successfully"))
}

/// DELETE /api/properties/:id (admin)
pub async fn delete(_admin: AdminUser, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id, "Invalid property ID")?;
    let pool = DatabaseManager::pool().await?;

    let result = sqlx::query("DELETE FROM properties WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Property not found"));
    }

    Ok(ApiResponse::<()>::message("Property deleted successfully"))
}
