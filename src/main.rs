pub mod applications;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod store;
pub mod validation;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use applications::{
    ApplicationRepository, ApplicationService, CreateApplicationRequest, EnrichedApplication,
    JobApplication, PgApplicationRepository, UpdateStatusRequest,
};
use auth::{IdentityRequest, SessionCookie, SessionResponse, TokenService};
use config::Config;
use jobs::{Job, JobRepository, NewJob, PgJobRepository, SalaryRange};
use store::{InMemoryApplicationRepository, InMemoryJobRepository, InsertResult, UpdateResult};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::issue_session_handler,
        auth::handlers::logout_handler,
        jobs::handlers::list_all_jobs_handler,
        jobs::handlers::list_preview_jobs_handler,
        jobs::handlers::get_job_handler,
        jobs::handlers::create_job_handler,
        applications::handlers::list_my_applications_handler,
        applications::handlers::list_job_applications_handler,
        applications::handlers::submit_application_handler,
        applications::handlers::update_application_status_handler,
    ),
    components(
        schemas(
            Job, NewJob, SalaryRange,
            JobApplication, EnrichedApplication, CreateApplicationRequest, UpdateStatusRequest,
            InsertResult, UpdateResult,
            IdentityRequest, SessionResponse,
        )
    ),
    tags(
        (name = "auth", description = "Session cookie issuance"),
        (name = "jobs", description = "Job postings"),
        (name = "applications", description = "Job applications")
    ),
    info(
        title = "Job Portal API",
        version = "0.1.0",
        description = "Backend for the job portal: postings, applications and sessions"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobRepository>,
    pub applications: ApplicationService,
    pub tokens: Arc<TokenService>,
    pub session_cookie: SessionCookie,
}

impl AppState {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        jwt_secret: &str,
        cookie_secure: bool,
    ) -> Self {
        Self {
            applications: ApplicationService::new(applications, jobs.clone()),
            jobs,
            tokens: Arc::new(TokenService::new(jwt_secret)),
            session_cookie: SessionCookie::new(cookie_secure),
        }
    }

    /// State backed by the in-memory gateways
    pub fn in_memory(jwt_secret: &str, cookie_secure: bool) -> Self {
        Self::new(
            Arc::new(InMemoryJobRepository::new()),
            Arc::new(InMemoryApplicationRepository::new()),
            jwt_secret,
            cookie_secure,
        )
    }
}

/// Handler for GET /
async fn root_handler() -> &'static str {
    "Job portal website backend coming here!"
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Credentialed requests cannot use wildcard origins
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS and tracing layers
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let session_required = middleware::from_fn_with_state(state.clone(), auth::require_session);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root_handler))
        // Session routes
        .route("/jwt", post(auth::issue_session_handler))
        .route("/logout", post(auth::logout_handler))
        // Job routes
        .route("/jobAll", get(jobs::list_all_jobs_handler))
        .route(
            "/jobs",
            get(jobs::list_preview_jobs_handler).post(jobs::create_job_handler),
        )
        .route("/jobs/:id", get(jobs::get_job_handler))
        // Application routes; only the applicant listing requires a session
        .route(
            "/job-application",
            get(applications::list_my_applications_handler)
                .route_layer(session_required)
                .post(applications::submit_application_handler),
        )
        .route(
            "/job-application/jobs/:job_id",
            get(applications::list_job_applications_handler),
        )
        .route(
            "/job-application/:id",
            patch(applications::update_application_status_handler),
        )
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the configured store and build the shared state.
///
/// Returns the database pool, if any, so it can be closed on shutdown.
async fn build_state(
    config: &Config,
) -> Result<(AppState, Option<db::DbPool>), Box<dyn std::error::Error>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using the in-memory store; data will not persist");
        return Ok((AppState::in_memory(&config.jwt_secret, config.cookie_secure), None));
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url, config.db_max_connections).await?;
    db::run_migrations(&pool).await?;

    let state = AppState::new(
        Arc::new(PgJobRepository::new(pool.clone())),
        Arc::new(PgApplicationRepository::new(pool.clone())),
        &config.jwt_secret,
        config.cookie_secure,
    );
    Ok((state, Some(pool)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Job Portal API - Starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if !config.cookie_secure {
        tracing::warn!("COOKIE_SECURE is off; enable it for any HTTPS deployment");
    }

    let (state, pool) = match build_state(&config).await {
        Ok(built) => built,
        Err(e) => {
            tracing::error!("Failed to initialise the store: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(state, &config.cors_allowed_origins);

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Job portal backend ready on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
    }

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed");
    }
    tracing::info!("Server shutdown complete");
}
