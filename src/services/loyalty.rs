// SPDX-License-Identifier: MIT

//! Client and service for the external point-card (loyalty) function.
//!
//! Handles:
//! - Claiming one-time link codes on behalf of the current user
//! - Fetching level/trophy data for a linked group
//! - Normalizing the loose upstream payload into the display model
//!
//! The function is the source of truth for links; the local
//! `user_profile_links` table is a convenience index updated best-effort
//! after a successful claim.

use crate::db::Db;
use crate::error::AppError;
use crate::models::{LevelInfo, PointCardData, Rarity, RawCardData, Trophy};
use axum::http::StatusCode;

/// HTTP client for the point-card edge function.
///
/// Both actions go to the same endpoint, discriminated by an `action`
/// field, and are authorized by a shared-secret `x-api-key` header.
#[derive(Clone)]
pub struct LoyaltyClient {
    http: reqwest::Client,
    function_url: String,
}

impl LoyaltyClient {
    pub fn new(function_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            function_url,
        }
    }

    /// Claim a one-time link code for the given site user.
    ///
    /// Returns the upstream JSON body untouched on 2xx. Non-2xx is
    /// surfaced verbatim (status and body) so the caller sees the
    /// upstream-reported reason, e.g. "code invalid or expired".
    pub async fn claim(
        &self,
        api_key: &str,
        code: &str,
        hp_user_id: &str,
    ) -> Result<serde_json::Value, AppError> {
        let response = self
            .post_action(
                api_key,
                serde_json::json!({
                    "action": "claim",
                    "code": code,
                    "hpUserId": hp_user_id,
                }),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::passthrough_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LoyaltyUnavailable(format!("JSON parse error: {}", e)))
    }

    /// Fetch level and trophy data for a linked group.
    ///
    /// Non-2xx keeps the upstream status but replaces the body with a
    /// generic failure; the raw body is only logged.
    pub async fn fetch(
        &self,
        api_key: &str,
        group_id: i64,
        hp_user_id: &str,
    ) -> Result<RawCardData, AppError> {
        let response = self
            .post_action(
                api_key,
                serde_json::json!({
                    "action": "fetch",
                    "groupId": group_id,
                    "hpUserId": hp_user_id,
                }),
            )
            .await?;

        if !response.status().is_success() {
            let status = Self::local_status(response.status());
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Point-card fetch failed");
            return Err(AppError::LoyaltyFetch(status));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LoyaltyUnavailable(format!("JSON parse error: {}", e)))
    }

    async fn post_action(
        &self,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, AppError> {
        self.http
            .post(&self.function_url)
            .header("x-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LoyaltyUnavailable(e.to_string()))
    }

    /// Build the verbatim passthrough error for a failed claim.
    ///
    /// The body is forwarded as-is, except that a `message` field is
    /// mirrored into `error` when `error` is absent, which is the shape
    /// the site frontend expects.
    async fn passthrough_error(response: reqwest::Response) -> AppError {
        let status = Self::local_status(response.status());
        let text = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %text, "Point-card claim failed");

        let mut body: serde_json::Value = serde_json::from_str(&text).unwrap_or_else(|_| {
            let detail = if text.is_empty() {
                format!("Edge function error: {}", status)
            } else {
                text.clone()
            };
            serde_json::json!({ "error": detail })
        });

        if let Some(obj) = body.as_object_mut() {
            if !obj.contains_key("error") {
                if let Some(message) = obj.get("message").cloned() {
                    obj.insert("error".to_string(), message);
                }
            }
        }

        AppError::LoyaltyApi { status, body }
    }

    /// Convert a reqwest status into our `http` status by numeric value.
    fn local_status(status: reqwest::StatusCode) -> StatusCode {
        StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PointCardService - claim/fetch with local link bookkeeping
// ─────────────────────────────────────────────────────────────────────────────

/// High-level point-card service.
///
/// Threads the API-key check in front of every outbound call: a missing
/// key fails closed with `MissingApiKey` before the network is touched.
#[derive(Clone)]
pub struct PointCardService {
    client: LoyaltyClient,
    db: Db,
    api_key: Option<String>,
}

impl PointCardService {
    pub fn new(function_url: String, api_key: Option<String>, db: Db) -> Self {
        Self {
            client: LoyaltyClient::new(function_url),
            db,
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }

    /// Establish a link from a one-time claim code.
    ///
    /// On upstream success the `(user, group)` pair is upserted into the
    /// local link table, along with the group-name snapshot when the
    /// response carries one. The upsert is best-effort: the remote claim
    /// already succeeded, so a local failure is logged, not surfaced.
    pub async fn claim(&self, user_id: &str, code: &str) -> Result<serde_json::Value, AppError> {
        let api_key = self.api_key()?;

        tracing::info!(user_id, "Claiming point-card link code");
        let data = self.client.claim(api_key, code, user_id).await?;

        let success = data
            .get("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let group_id = data.get("group_id").and_then(|v| v.as_i64());

        if success {
            if let Some(group_id) = group_id {
                if let Some(name) = data.get("group_name").and_then(|v| v.as_str()) {
                    if let Err(e) = self.db.upsert_group(group_id, name).await {
                        tracing::warn!(error = %e, group_id, "Failed to snapshot group name");
                    }
                }

                if let Err(e) = self.db.upsert_link(user_id, group_id).await {
                    tracing::error!(error = %e, user_id, group_id, "Failed to save link locally");
                } else {
                    tracing::info!(user_id, group_id, "Point-card link established");
                }
            }
        }

        Ok(data)
    }

    /// Fetch and normalize level/trophy data for a linked group.
    pub async fn fetch(&self, user_id: &str, group_id: i64) -> Result<PointCardData, AppError> {
        let api_key = self.api_key()?;
        let raw = self.client.fetch(api_key, group_id, user_id).await?;
        Ok(normalize_card(raw))
    }
}

/// Normalize the raw edge-function payload into the display model.
///
/// Pure and total: `earned` becomes `achieved` (no other field changes),
/// missing trophy ids are synthesized from the array position, unknown
/// rarities degrade to `common`. Synthesized ids are stable within one
/// response only.
pub fn normalize_card(raw: RawCardData) -> PointCardData {
    let trophies = raw
        .trophies
        .into_iter()
        .enumerate()
        .map(|(index, t)| Trophy {
            id: t.id.unwrap_or_else(|| format!("trophy-{}", index)),
            name: t.name,
            description: t.description,
            rarity: Rarity::parse(t.rarity.as_deref()),
            achieved: t.earned,
            achieved_at: t.achieved_at,
        })
        .collect();

    PointCardData {
        level_info: LevelInfo {
            level: raw.level,
            total_points: raw.total_points,
            next_remaining: raw.next_remaining,
        },
        trophies,
    }
}
