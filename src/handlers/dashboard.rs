use serde::Serialize;
use sqlx::PgPool;
use tracing::error;

use crate::database::manager::DatabaseManager;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};

/// Sale commission used for the revenue estimate on the admin dashboard.
const COMMISSION_RATE: &str = "0.03";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_properties: i64,
    pub total_blogs: i64,
    pub total_inquiries: i64,
    pub new_inquiries: i64,
    pub total_views: i64,
    pub monthly_revenue: i64,
}

/// GET /api/admin/dashboard (admin). Each figure degrades to zero on its
/// own query failure; a broken stat must not blank the whole dashboard.
pub async fn stats(_admin: AdminUser) -> ApiResult<DashboardStats> {
    let pool = DatabaseManager::pool().await?;

    let revenue_sql = format!(
        "SELECT COALESCE(ROUND(SUM(price) * {}), 0)::BIGINT FROM properties \
         WHERE status = 'Sold' AND updated_at >= date_trunc('month', now())",
        COMMISSION_RATE
    );

    let stats = DashboardStats {
        total_properties: scalar_or_zero(&pool, "SELECT COUNT(*) FROM properties").await,
        total_blogs: scalar_or_zero(&pool, "SELECT COUNT(*) FROM blogs").await,
        total_inquiries: scalar_or_zero(&pool, "SELECT COUNT(*) FROM inquiries").await,
        new_inquiries: scalar_or_zero(
            &pool,
            "SELECT COUNT(*) FROM inquiries WHERE status = 'new'",
        )
        .await,
        total_views: scalar_or_zero(
            &pool,
            "SELECT COALESCE(SUM(views), 0)::BIGINT FROM properties",
        )
        .await,
        monthly_revenue: scalar_or_zero(&pool, &revenue_sql).await,
    };

    Ok(ApiResponse::success(stats))
}

async fn scalar_or_zero(pool: &PgPool, sql: &str) -> i64 {
    match sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await {
        Ok(n) => n,
        Err(e) => {
            error!("Dashboard stat query failed ({}): {}", sql, e);
            0
        }
    }
}
