mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::assessments::AssessmentService;
use crate::features::reports::{routes as reports_routes, InspectionService, ReportService};
use crate::features::uploads::routes as uploads_routes;
use crate::modules::storage::LocalDiskStorage;
use axum::{middleware::from_fn, Router};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Open the embedded store; the schema must exist before serving
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created: {}", config.database.url);

    database::ensure_schema(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize database: {}", e))?;
    tracing::info!("Database initialized successfully");

    LocalDiskStorage::new(&config.uploads.dir)
        .ensure_root()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory: {}", e))?;
    tracing::info!("Upload directory ready: {}", config.uploads.dir.display());

    let app = build_router(&config, pool.clone());

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server running on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Database connection pool closed");

    Ok(())
}

/// Compose services and routes over an opened store
fn build_router(config: &Config, pool: SqlitePool) -> Router {
    let storage = Arc::new(LocalDiskStorage::new(&config.uploads.dir));
    let assessment_service = Arc::new(AssessmentService::new());
    let report_service = Arc::new(ReportService::new(pool));
    let inspection_service = Arc::new(InspectionService::new(
        Arc::clone(&storage),
        assessment_service,
        Arc::clone(&report_service),
    ));

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(swagger)
        .merge(reports_routes(
            report_service,
            inspection_service,
            config.app.max_request_body_size,
        ))
        .merge(uploads_routes(storage.root()))
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderValue, StatusCode};

    use crate::shared::test_helpers::TestApp;

    #[tokio::test]
    async fn test_health_check() {
        let app = TestApp::spawn().await;

        app.server.get("/health").await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let app = TestApp::spawn().await;

        let response = app.server.get("/health").await;

        assert!(!response.header("x-request-id").is_empty());
    }

    #[tokio::test]
    async fn test_cors_exposes_content_disposition() {
        let app = TestApp::spawn().await;

        let response = app
            .server
            .get("/reports/csv")
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:5173"),
            )
            .await;

        response.assert_status_ok();
        let exposed = response.header(header::ACCESS_CONTROL_EXPOSE_HEADERS);
        assert!(exposed
            .to_str()
            .unwrap()
            .to_ascii_lowercase()
            .contains("content-disposition"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = TestApp::spawn().await;

        let response = app.server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let doc: serde_json::Value = response.json();
        assert!(doc["paths"]["/predict"].is_object());
    }
}
