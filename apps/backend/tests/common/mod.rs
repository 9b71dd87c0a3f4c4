//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping an in-memory application state and router
//! - Helper functions for creating test data

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use chrono::Utc;

use recall_core::{Card, CardId, MemoryCardStore, MemoryReviewLog};
use second_brain_backend::services::seed::demo_cards;
use second_brain_backend::{build_router, AppState};

/// Test context containing the application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context with an empty card store.
    pub fn new() -> Self {
        Self::with_cards(Vec::new())
    }

    /// Create a context whose store starts with `cards`.
    pub fn with_cards(cards: Vec<Card>) -> Self {
        let state = AppState::new(
            Arc::new(MemoryCardStore::with_cards(cards)),
            Arc::new(MemoryReviewLog::new()),
            3,
        );
        let app = build_router(state.clone(), Duration::from_secs(5));
        Self { state, app }
    }

    /// Create a context loaded with the demo deck.
    pub fn seeded() -> Self {
        Self::with_cards(demo_cards(Utc::now()))
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Read a card straight from the store.
    pub fn card(&self, id: &str) -> Card {
        self.state
            .cards
            .get(&CardId::from(id))
            .expect("card should exist")
    }
}
