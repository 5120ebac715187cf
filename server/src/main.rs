//! Plant Disease ML Service
//!
//! HTTP API server for plant leaf disease classification. Accepts image
//! uploads, runs them through the inference pipeline, and returns ranked
//! disease predictions with confidence scores.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use plant_disease_ml::{Classifier, OnnxClassifier, IMAGE_SIZE, MAX_IMAGE_BYTES, NUM_CLASSES};

use crate::state::{AppState, ServerConfig};

/// Plant Disease ML Service
#[derive(Parser, Debug)]
#[command(name = "plant-disease-server")]
#[command(version = "1.0.0")]
#[command(about = "HTTP API server for plant disease classification")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to the ONNX model artifact
    #[arg(long, env = "MODEL_PATH", default_value = "model/plant_disease_model.onnx")]
    model: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Plant Disease ML Service v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Model path: {:?}", cli.model);
    info!("  Image size: {}x{}", IMAGE_SIZE, IMAGE_SIZE);
    info!("  Classes:    {}", NUM_CLASSES);

    if !cli.model.exists() {
        warn!(
            "Model artifact not found at {:?}. Prediction requests will fail \
            with model-unavailable until one is provided.",
            cli.model
        );
    }

    // Load the model once at startup. A failure is not fatal: the service
    // keeps running in degraded mode and rejects predictions gracefully.
    let model: Option<Box<dyn Classifier>> = match OnnxClassifier::load(&cli.model) {
        Ok(classifier) => Some(Box::new(classifier)),
        Err(e) => {
            error!("Failed to load model: {}", e);
            None
        }
    };

    // Create shared state
    let config = ServerConfig {
        model_path: cli.model,
        ..Default::default()
    };
    let state = Arc::new(AppState::new(config, model));

    // Build router
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        .route("/classes", get(routes::classes::list_classes))
        .with_state(state)
        // Headroom above the 10 MiB cap so oversized uploads reach the
        // explicit file-too-large check instead of a bare 413.
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
