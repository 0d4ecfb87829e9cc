// SPDX-License-Identifier: MIT

//! Public content routes: news and live-event listings.

use crate::error::Result;
use crate::models::{LiveEvent, NewsPost};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Public routes (no auth required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/news", get(get_news))
        .route("/api/lives", get(get_lives))
}

#[derive(Deserialize)]
struct NewsQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    20
}

const MAX_PER_PAGE: u32 = 50;

#[derive(Serialize)]
pub struct NewsResponse {
    pub news: Vec<NewsPost>,
    pub page: u32,
    pub per_page: u32,
}

/// Published news, newest first.
async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsQuery>,
) -> Result<Json<NewsResponse>> {
    let page = params.page.max(1);
    let per_page = params.per_page.min(MAX_PER_PAGE);
    let offset = (page - 1).saturating_mul(per_page);

    let news = state.db.list_published_news(per_page, offset).await?;

    Ok(Json(NewsResponse {
        news,
        page,
        per_page,
    }))
}

#[derive(Serialize)]
pub struct LivesResponse {
    pub lives: Vec<LiveEvent>,
}

/// Published live events with venue names, soonest first.
async fn get_lives(State(state): State<Arc<AppState>>) -> Result<Json<LivesResponse>> {
    let lives = state.db.list_published_lives().await?;
    Ok(Json(LivesResponse { lives }))
}
