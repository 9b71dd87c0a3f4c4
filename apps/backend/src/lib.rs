pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use recall_core::{CardStore, MemoryCardStore, MemoryReviewLog, ReviewLog, Scheduler};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::services::seed::demo_cards;
use crate::services::study::StudyService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cards: Arc<dyn CardStore>,
    pub review_log: Arc<dyn ReviewLog>,
    pub study: Arc<StudyService>,
}

impl AppState {
    pub fn new(
        cards: Arc<dyn CardStore>,
        review_log: Arc<dyn ReviewLog>,
        review_retry_limit: u32,
    ) -> Self {
        let study = StudyService::new(
            cards.clone(),
            review_log.clone(),
            Scheduler::default(),
            review_retry_limit,
        );
        Self {
            cards,
            review_log,
            study: Arc::new(study),
        }
    }

    /// In-memory state, seeded with the demo deck when configured.
    pub fn in_memory(config: &AppConfig) -> Self {
        let store = if config.seed_demo_cards {
            MemoryCardStore::with_cards(demo_cards(Utc::now()))
        } else {
            MemoryCardStore::new()
        };
        Self::new(
            Arc::new(store),
            Arc::new(MemoryReviewLog::new()),
            config.review_retry_limit,
        )
    }
}

/// Build the application router.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route(
            "/api/flashcards",
            get(routes::flashcards::list).post(routes::flashcards::create),
        )
        .route("/api/flashcards/next", get(routes::study::next))
        .route(
            "/api/flashcards/:id",
            get(routes::flashcards::get)
                .put(routes::flashcards::update)
                .delete(routes::flashcards::delete),
        )
        .route("/api/flashcards/:id/review", post(routes::study::review))
        .route("/api/flashcards/:id/reset", post(routes::study::reset))
        .route("/api/reviews", get(routes::study::history));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!("Initializing card store...");
    let state = AppState::in_memory(&config);
    tracing::info!(cards = state.cards.list()?.len(), "Card store ready");

    let app = build_router(state, config.request_timeout);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
