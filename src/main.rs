mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use crate::config::{LoggingSettings, Settings};
use crate::core::MatchEngine;
use crate::routes::matches::AppState;
use crate::services::{AppwriteClient, AppwriteCollections, PgMatchStore, ReasoningClient};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Initialize tracing from the configured level and format; RUST_LOG
/// overrides the configured level when set
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        builder.pretty().init();
    } else {
        builder.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration has to come first; logging is configured from it
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    init_tracing(&settings.logging);

    info!("Starting Compass Fit scoring service...");
    info!(
        "Configuration loaded (log level: {}, format: {})",
        settings.logging.level, settings.logging.format
    );

    // Initialize Appwrite client for the CRM read models
    let appwrite_collections = AppwriteCollections {
        products: settings.collection.products,
        contacts: settings.collection.contacts,
    };

    let appwrite = Arc::new(AppwriteClient::new(
        settings.appwrite.endpoint,
        settings.appwrite.api_key,
        settings.appwrite.project_id,
        settings.appwrite.database_id,
        appwrite_collections,
    ));

    info!("Appwrite client initialized");

    // Initialize the PostgreSQL match store
    let db_max_conn = settings.database.max_connections.unwrap_or(10);
    let db_min_conn = settings.database.min_connections.unwrap_or(1);

    let store = Arc::new(
        PgMatchStore::from_settings(
            &settings.database.url,
            Some(db_max_conn),
            Some(db_min_conn),
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            panic!("PostgreSQL connection error: {}", e);
        }),
    );

    info!("Match store initialized (max: {} connections)", db_max_conn);

    // Initialize the engine with configured weights
    let weights = settings.scoring.weights.to_score_weights();

    let mut engine = MatchEngine::new(weights, store.clone()).unwrap_or_else(|e| {
        error!("Invalid scoring weights: {}", e);
        panic!("Scoring configuration error: {}", e);
    });

    info!("Match engine initialized with weights: {:?}", weights);

    // AI blending is optional: without a key the engine stays rule-based
    if settings.reasoning.enabled() {
        let reasoner = Arc::new(ReasoningClient::new(
            settings.reasoning.base_url.clone(),
            settings.reasoning.api_key.clone(),
            settings.reasoning.model.clone(),
            settings.reasoning.timeout_secs.unwrap_or(30),
        ));
        engine = engine.with_reasoner(reasoner);
        info!("Reasoning service enabled (model: {})", settings.reasoning.model);
    } else {
        info!("Reasoning service disabled, serving rule-based matches only");
    }

    // Build application state
    let app_state = AppState {
        appwrite,
        store,
        engine,
        default_chunk_size: settings.batch.chunk_size,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
