use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use estate_api::config;
use estate_api::database::manager::DatabaseManager;
use estate_api::handlers::{auth, blogs, dashboard, inquiries, properties, upload};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Estate API in {:?} mode", config.environment);

    // Connect and migrate before accepting traffic; a bad DATABASE_URL
    // should fail the process, not the first request.
    if let Err(e) = DatabaseManager::init().await {
        eprintln!("Database initialization failed: {}", e);
        std::process::exit(1);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Estate API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Resources (mutations carry the admin guard in their handlers)
        .merge(property_routes())
        .merge(blog_routes())
        .merge(inquiry_routes())
        .merge(auth_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
}

fn property_routes() -> Router {
    Router::new()
        .route(
            "/api/properties",
            get(properties::list).post(properties::create),
        )
        .route(
            "/api/properties/:id",
            get(properties::get)
                .put(properties::update)
                .delete(properties::delete),
        )
}

fn blog_routes() -> Router {
    Router::new()
        .route("/api/blogs", get(blogs::list).post(blogs::create))
        .route(
            "/api/blogs/:id",
            get(blogs::get).put(blogs::update).delete(blogs::delete),
        )
}

fn inquiry_routes() -> Router {
    Router::new()
        .route(
            "/api/inquiries",
            get(inquiries::list).post(inquiries::create),
        )
        .route(
            "/api/inquiries/:id",
            axum::routing::put(inquiries::update_status).delete(inquiries::delete),
        )
}

fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", get(auth::verify))
        // One-shot bootstrap; refuses once an admin exists.
        .route("/api/setup/admin", post(auth::setup_admin))
}

fn admin_routes() -> Router {
    // The framework's default body cap is smaller than the configured
    // upload cap; raise it here (with room for multipart framing) so the
    // size check in the media module is the one that answers.
    let upload_body_limit = config::config().media.max_upload_bytes + 1024 * 1024;

    Router::new()
        .route("/api/admin/dashboard", get(dashboard::stats))
        .route(
            "/api/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
}

fn cors_layer() -> CorsLayer {
    let origins = &config::config().security.cors_origins;
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Estate API",
            "version": version,
            "description": "Real-estate listing and marketing backend",
            "endpoints": {
                "home": "/ (public)",
                "properties": "/api/properties[/:id] (GET public, mutations admin)",
                "blogs": "/api/blogs[/:id] (GET public, mutations admin)",
                "inquiries": "/api/inquiries[/:id] (POST public, rest admin)",
                "auth": "/api/auth/login, /api/auth/verify",
                "setup": "/api/setup/admin (one-shot bootstrap)",
                "dashboard": "/api/admin/dashboard (admin)",
                "upload": "/api/upload (admin)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
