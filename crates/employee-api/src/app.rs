use axum::http::Method;
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::config::Config;
use crate::controllers::AppState;
use crate::openapi::ApiDoc;
use crate::routing;

/// Path of the interactive API reference; the raw document lives below it.
pub const API_DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// The employee API application: configuration plus the shared storage handle.
pub struct App {
    pub config: Config,
    pub db: DatabaseConnection,
}

impl App {
    /// Create the application with a given config, connecting to storage.
    ///
    /// A storage connection failure is returned to the caller; the binary
    /// exits on it.
    pub async fn with_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        tracing::info!(environment = %config.environment, "Connecting to database...");
        let db = crate::db::connect(&config).await?;
        tracing::info!("Database connection established.");

        Ok(App { config, db })
    }

    /// Build the Axum router with CORS, API docs and (in development)
    /// request tracing.
    pub fn router(&self) -> Router {
        let state = AppState::new(self.db.clone(), self.config.clone());
        build_router(state)
    }

    /// Run the application server until Ctrl-C.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.server_addr();
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(
            "Server is running at http://{} (docs: http://{}{})",
            addr,
            addr,
            API_DOCS_PATH
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Assemble the full router around an already-built state.
pub fn build_router(state: AppState) -> Router {
    let is_dev = state.config.is_dev();

    let mut router = routing::build_routes()
        .with_state(state)
        .merge(Scalar::with_url(API_DOCS_PATH, ApiDoc::openapi()))
        .route(
            OPENAPI_JSON_PATH,
            axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
        );

    // Only add tracing/request-id middleware in development mode.
    if is_dev {
        use tower_http::trace::DefaultMakeSpan;
        use tower_http::trace::DefaultOnRequest;
        use tower_http::trace::DefaultOnResponse;
        use tower_http::LatencyUnit;

        let x_request_id = axum::http::HeaderName::from_static("x-request-id");
        router = router
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(x_request_id))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(
                        DefaultOnResponse::new()
                            .level(tracing::Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            );
    }

    // Outermost, so preflights are answered before routing.
    router.layer(cors_layer())
}

/// Cross-origin policy: any origin, the four CRUD methods, any header,
/// no credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_credentials(false)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down employee API...");
}
