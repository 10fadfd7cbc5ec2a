//! Documentation of a small recipe catalog service.
//!
//! # General Infrastructure
//! - One axum server, no external services
//! - Recipes live in a single JSON document (`recipes.json` by default)
//! - Uploaded images live in a directory (`images/` by default), served under `/images`
//! - Every request loads the document; mutations rewrite it whole
//!
//!
//!
//! # Endpoints
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/` | index page |
//! | GET | `/recipes.json` | all recipes |
//! | GET | `/recipes.json/{id}` | one recipe |
//! | POST | `/recipes.json` | 201, created recipe (multipart form) |
//! | PUT | `/recipes.json/{id}` | replaced recipe (JSON body) |
//! | DELETE | `/recipes.json/{id}` | `{"success":"Recipe deleted"}` |
//! | GET | `/recipes.json/search?q=` | title/ingredient matches |
//! | GET | `/recipes.json/filter?category=` | exact category matches |
//!
//! Errors are always `{"error": "..."}`.
//!
//!
//!
//! # Notes
//!
//! ## Concurrency
//! Create, update and delete hold the store lock across load, change and
//! save, so two writers can no longer overwrite each other. Reads never wait
//! on it; the rename in `save` keeps them from seeing half a document.
//!
//! ## Uploads
//! Only `png`, `jpg`, `jpeg` and `gif` are kept. Any other extension still
//! creates the recipe, just without an image.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! Environment (all optional).
//! ```sh
//! RUST_PORT=8000 RECIPES_FILE=recipes.json IMAGES_DIR=images MAX_UPLOAD_BYTES=16777216
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod images;
pub mod models;
pub mod routes;
pub mod search;
pub mod state;
pub mod utils;

use config::Config;
use routes::{
    create_handler, delete_handler, filter_handler, get_handler, index_handler, list_handler,
    search_handler, update_handler,
};
use state::State;

pub fn build_router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler))
        .route("/recipes.json", get(list_handler).post(create_handler))
        .route("/recipes.json/search", get(search_handler))
        .route("/recipes.json/filter", get(filter_handler))
        .route(
            "/recipes.json/{id}",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .nest_service("/images", ServeDir::new(state.images.dir()))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load();

    info!("Initializing state...");
    let state = State::new(config).await?;
    info!(
        "Recipes at {}, images in {}",
        state.store.path().display(),
        state.images.dir().display()
    );

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = build_router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
