mod config;
mod db;
mod error;
mod handlers;
mod models;
mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::db::repository::{MongoExperienceStore, MongoProjectStore};
use crate::db::{ExperienceStore, ProjectStore};
use crate::storage::cloudinary::CloudinaryClient;
use crate::storage::MediaStore;

// Uploads are image files; the axum default of 2 MB is too small.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Dependencies constructed once at startup and injected into every
/// handler, so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ProjectStore>,
    pub experiences: Arc<dyn ExperienceStore>,
    pub media: Arc<dyn MediaStore>,
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/projects", get(handlers::projects::list_projects))
        .route(
            "/api/projects/create-with-images",
            post(handlers::projects::create_project),
        )
        .route(
            "/api/experiences",
            get(handlers::experiences::list_experiences),
        )
        .route(
            "/api/experiences/create-with-image",
            post(handlers::experiences::create_experience),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Portfolio API...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Fail fast: without the record store the service is useless.
    let database = match db::connect(&config.database).await {
        Ok(database) => database,
        Err(err) => {
            tracing::error!("MongoDB connection error: {:#}", err);
            std::process::exit(1);
        }
    };
    info!("MongoDB connected");

    let state = AppState {
        projects: Arc::new(MongoProjectStore::new(&database)),
        experiences: Arc::new(MongoExperienceStore::new(&database)),
        media: Arc::new(CloudinaryClient::new(config.cloudinary.clone())),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Portfolio API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
