// SPDX-License-Identifier: MIT

//! Admin console routes: news, live-event, and venue records.
//!
//! All routes here sit behind both the session and admin-role middleware
//! layers (applied in routes/mod.rs). Only the persisted-record effects
//! of the console live in this API; the forms are the frontend's concern.

use crate::error::{AppError, Result};
use crate::models::content::{STATUS_DRAFT, STATUS_PUBLISHED};
use crate::models::{LiveEvent, NewsPost, Venue};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Admin routes (require authentication + admin role).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/news", get(list_news).post(create_news))
        .route("/api/admin/news/{id}", put(update_news).delete(delete_news))
        .route("/api/admin/lives", get(list_lives).post(create_live))
        .route("/api/admin/lives/{id}", put(update_live).delete(delete_live))
        .route("/api/admin/venues", get(list_venues).post(create_venue))
}

#[derive(Serialize)]
struct MutationResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
}

fn validate_status(status: &str) -> Result<()> {
    if status == STATUS_DRAFT || status == STATUS_PUBLISHED {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid status: {}",
            status
        )))
    }
}

// ─── News ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NewsInput {
    slug: String,
    title_ja: String,
    title_en: Option<String>,
    body_ja: Option<String>,
    body_en: Option<String>,
    category: Option<String>,
    #[serde(default = "default_status")]
    status: String,
    published_at: Option<DateTime<Utc>>,
    eyecatch_url: Option<String>,
}

fn default_status() -> String {
    STATUS_DRAFT.to_string()
}

impl NewsInput {
    fn validate(&self) -> Result<()> {
        if self.slug.trim().is_empty() {
            return Err(AppError::BadRequest("Slug is required".to_string()));
        }
        if self.title_ja.trim().is_empty() {
            return Err(AppError::BadRequest("Japanese title is required".to_string()));
        }
        validate_status(&self.status)
    }

    fn into_post(self, id: Uuid) -> NewsPost {
        let now = Utc::now();
        NewsPost {
            id,
            slug: self.slug,
            title_ja: self.title_ja,
            title_en: self.title_en,
            body_ja: self.body_ja,
            body_en: self.body_en,
            category: self.category,
            status: self.status,
            published_at: self.published_at,
            eyecatch_url: self.eyecatch_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// All news including drafts.
async fn list_news(State(state): State<Arc<AppState>>) -> Result<Json<Vec<NewsPost>>> {
    Ok(Json(state.db.list_all_news().await?))
}

async fn create_news(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewsInput>,
) -> Result<Json<MutationResponse>> {
    input.validate()?;

    let post = input.into_post(Uuid::new_v4());
    state.db.insert_news(&post).await?;
    tracing::info!(id = %post.id, slug = %post.slug, "News created");

    Ok(Json(MutationResponse {
        success: true,
        id: Some(post.id),
    }))
}

async fn update_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewsInput>,
) -> Result<Json<MutationResponse>> {
    input.validate()?;

    let post = input.into_post(id);
    if !state.db.update_news(&post).await? {
        return Err(AppError::NotFound(format!("News {}", id)));
    }
    tracing::info!(%id, "News updated");

    Ok(Json(MutationResponse {
        success: true,
        id: Some(id),
    }))
}

async fn delete_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MutationResponse>> {
    if !state.db.delete_news(id).await? {
        return Err(AppError::NotFound(format!("News {}", id)));
    }
    tracing::info!(%id, "News deleted");

    Ok(Json(MutationResponse {
        success: true,
        id: None,
    }))
}

// ─── Lives ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct LiveInput {
    title_ja: String,
    title_en: Option<String>,
    date: Option<DateTime<Utc>>,
    open_time: Option<String>,
    start_time: Option<String>,
    venue_id: Option<Uuid>,
    price_ja: Option<String>,
    price_en: Option<String>,
    performers_ja: Option<String>,
    performers_en: Option<String>,
    notes_ja: Option<String>,
    notes_en: Option<String>,
    #[serde(default = "default_status")]
    status: String,
}

impl LiveInput {
    fn validate(&self) -> Result<()> {
        if self.title_ja.trim().is_empty() {
            return Err(AppError::BadRequest("Japanese title is required".to_string()));
        }
        validate_status(&self.status)
    }

    fn into_event(self, id: Uuid) -> LiveEvent {
        let now = Utc::now();
        LiveEvent {
            id,
            title_ja: self.title_ja,
            title_en: self.title_en,
            date: self.date,
            open_time: self.open_time,
            start_time: self.start_time,
            venue_id: self.venue_id,
            price_ja: self.price_ja,
            price_en: self.price_en,
            performers_ja: self.performers_ja,
            performers_en: self.performers_en,
            notes_ja: self.notes_ja,
            notes_en: self.notes_en,
            status: self.status,
            created_at: now,
            updated_at: now,
            venue_name_ja: None,
            venue_name_en: None,
        }
    }
}

/// All live events including drafts.
async fn list_lives(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LiveEvent>>> {
    Ok(Json(state.db.list_all_lives().await?))
}

async fn create_live(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LiveInput>,
) -> Result<Json<MutationResponse>> {
    input.validate()?;

    let live = input.into_event(Uuid::new_v4());
    state.db.insert_live(&live).await?;
    tracing::info!(id = %live.id, "Live event created");

    Ok(Json(MutationResponse {
        success: true,
        id: Some(live.id),
    }))
}

async fn update_live(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<LiveInput>,
) -> Result<Json<MutationResponse>> {
    input.validate()?;

    let live = input.into_event(id);
    if !state.db.update_live(&live).await? {
        return Err(AppError::NotFound(format!("Live {}", id)));
    }
    tracing::info!(%id, "Live event updated");

    Ok(Json(MutationResponse {
        success: true,
        id: Some(id),
    }))
}

async fn delete_live(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MutationResponse>> {
    if !state.db.delete_live(id).await? {
        return Err(AppError::NotFound(format!("Live {}", id)));
    }
    tracing::info!(%id, "Live event deleted");

    Ok(Json(MutationResponse {
        success: true,
        id: None,
    }))
}

// ─── Venues ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct VenueInput {
    name_ja: String,
    name_en: Option<String>,
    address_ja: Option<String>,
    address_en: Option<String>,
}

async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Venue>>> {
    Ok(Json(state.db.list_venues().await?))
}

async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(input): Json<VenueInput>,
) -> Result<Json<MutationResponse>> {
    if input.name_ja.trim().is_empty() {
        return Err(AppError::BadRequest("Japanese name is required".to_string()));
    }

    let venue = Venue {
        id: Uuid::new_v4(),
        name_ja: input.name_ja,
        name_en: input.name_en,
        address_ja: input.address_ja,
        address_en: input.address_en,
    };
    state.db.insert_venue(&venue).await?;
    tracing::info!(id = %venue.id, "Venue created");

    Ok(Json(MutationResponse {
        success: true,
        id: Some(venue.id),
    }))
}
