// SPDX-License-Identifier: MIT

//! Point-card routes: link claiming, card data fetch, link listing, and
//! unlinking. All of these require an authenticated session.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{LinkedGroup, PointCardData};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Point-card routes (require authentication).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/pointcard/claim", post(claim_code))
        .route("/api/pointcard/fetch", post(fetch_card))
        .route("/api/pointcard/links", get(get_links))
        .route(
            "/api/pointcard/links/{group_id}",
            axum::routing::delete(unlink_group),
        )
}

// ─── Link Establishment ──────────────────────────────────────

#[derive(Deserialize)]
struct ClaimRequest {
    code: Option<String>,
}

/// Claim a one-time link code.
///
/// The upstream response body is returned as-is; the local link row is a
/// side effect handled by the service.
async fn claim_code(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ClaimRequest>,
) -> Result<Json<serde_json::Value>> {
    let code = body
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Code is required".to_string()))?;

    let data = state.point_card.claim(&user.user_id, code).await?;
    Ok(Json(data))
}

// ─── Card Data Fetcher ───────────────────────────────────────

#[derive(Deserialize)]
struct FetchRequest {
    #[serde(rename = "groupId")]
    group_id: Option<i64>,
}

/// Fetch normalized level/trophy data for a linked group.
async fn fetch_card(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<FetchRequest>,
) -> Result<Json<PointCardData>> {
    let group_id = body
        .group_id
        .ok_or_else(|| AppError::BadRequest("Group ID is required".to_string()))?;

    let data = state.point_card.fetch(&user.user_id, group_id).await?;
    Ok(Json(data))
}

// ─── Identity Resolver ───────────────────────────────────────

/// List the current user's links with resolved group names.
///
/// Zero links is an empty list, not an error. The first element is a
/// reasonable default selection for the widget; no stronger ordering is
/// promised.
async fn get_links(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<LinkedGroup>>> {
    let links = state.db.list_links(&user.user_id).await?;
    Ok(Json(links))
}

// ─── Unlink Operation ────────────────────────────────────────

#[derive(Serialize)]
struct UnlinkResponse {
    success: bool,
}

/// Remove the caller's link to a group. The caller re-reads the link
/// list to observe the removal.
async fn unlink_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<i64>,
) -> Result<Json<UnlinkResponse>> {
    let removed = state.db.unlink_group(&user.user_id, group_id).await?;
    tracing::info!(user_id = %user.user_id, group_id, removed, "Unlink requested");
    Ok(Json(UnlinkResponse { success: true }))
}
