//! HTTP API handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::config::SiteConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub started: Instant,
}

impl AppState {
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site: Arc::new(site),
            started: Instant::now(),
        }
    }
}

/// General status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub git_sha: &'static str,
    pub uptime_secs: u64,
}

/// GET /status - Health check
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("DOCSITE_VERSION"),
        git_sha: env!("DOCSITE_GIT_SHA"),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}
