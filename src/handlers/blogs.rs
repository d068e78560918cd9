use axum::extract::{Path, Query};
use serde::Deserialize;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::blog::{
    calculate_read_time, slugify, Blog, BlogInput, BLOG_SORT_COLUMNS,
};
use crate::database::query_builder::fetch_page;
use crate::error::ApiError;
use crate::listing::{ListingQuery, PageParams};
use crate::middleware::{AdminUser, ApiJson, ApiResponse, ApiResult};

use super::parse_id;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub featured: Option<String>,
    /// Drafts are hidden unless `published=false` is requested (admin UI).
    pub published: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// GET /api/blogs
pub async fn list(Query(q): Query<BlogListQuery>) -> ApiResult<Vec<Blog>> {
    let pool = DatabaseManager::pool().await?;
    let page = PageParams::resolve(
        q.page.as_deref(),
        q.limit.as_deref(),
        config::config().pagination.default_limit,
    );

    let query = ListingQuery::new("blogs", page)
        .search(&["title", "content", "excerpt"], q.search.as_deref())
        .eq("category", q.category.as_deref())
        .flag_true("featured", q.featured.as_deref())
        .flag_default("published", q.published.as_deref(), true)
        .sort(q.sort_by.as_deref(), q.sort_order.as_deref(), BLOG_SORT_COLUMNS);

    let (blogs, pagination) = fetch_page::<Blog>(&pool, &query).await?;
    Ok(ApiResponse::paginated(blogs, pagination))
}

/// GET /api/blogs/:id — reads count as views, same as properties.
pub async fn get(Path(id): Path<String>) -> ApiResult<Blog> {
    let id = parse_id(&id, "Invalid blog ID")?;
    let pool = DatabaseManager::pool().await?;

    let blog = sqlx::query_as::<_, Blog>(
        "UPDATE blogs SET views = views + 1 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Blog post not found"))?;

    Ok(ApiResponse::success(blog))
}

/// POST /api/blogs (admin). Slug, excerpt and read time are derived on the
/// server; clients never submit them.
pub async fn create(_admin: AdminUser, ApiJson(input): ApiJson<BlogInput>) -> ApiResult<Blog> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let slug = slugify(&input.title);
    let excerpt = input.resolved_excerpt();
    let read_time = calculate_read_time(&input.content);

    let pool = DatabaseManager::pool().await?;
    let blog = sqlx::query_as::<_, Blog>(
        "INSERT INTO blogs \
           (title, content, excerpt, author, category, tags, image, slug, \
            featured, published, read_time) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING *",
    )
    .bind(input.title)
    .bind(input.content)
    .bind(excerpt)
    .bind(input.author)
    .bind(input.category)
    .bind(input.tags)
    .bind(input.image)
    .bind(slug)
    .bind(input.featured)
    .bind(input.published)
    .bind(read_time)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created(blog).with_message("Blog post created successfully"))
}

/// PUT /api/blogs/:id (admin) — full replacement; derived fields are
/// recomputed from the new title and content.
pub async fn update(
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<BlogInput>,
) -> ApiResult<Blog> {
    let id = parse_id(&id, "Invalid blog ID")?;
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let slug = slugify(&input.title);
    let excerpt = input.resolved_excerpt();
    let read_time = calculate_read_time(&input.content);

    let pool = DatabaseManager::pool().await?;
    let blog = sqlx::query_as::<_, Blog>(
        "UPDATE blogs SET \
           title = $1, content = $2, excerpt = $3, author = $4, category = $5, \
           tags = $6, image = $7, slug = $8, featured = $9, published = $10, \
           read_time = $11, updated_at = now() \
         WHERE id = $12 \
         RETURNING *",
    )
    .bind(input.title)
    .bind(input.content)
    .bind(excerpt)
    .bind(input.author)
    .bind(input.category)
    .bind(input.tags)
    .bind(input.image)
    .bind(slug)
    .bind(input.featured)
    .bind(input.published)
    .bind(read_time)
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Blog post not found"))?;

    Ok(ApiResponse::success(blog).with_message("Blog post updated successfully"))
}

/// DELETE /api/blogs/:id (admin)
pub async fn delete(_admin: AdminUser, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id, "Invalid blog ID")?;
    let pool = DatabaseManager::pool().await?;

    let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Blog post not found"));
    }

    Ok(ApiResponse::<()>::message("Blog post deleted successfully"))
}
