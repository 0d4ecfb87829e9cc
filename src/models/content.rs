// SPDX-License-Identifier: MIT

//! Content records behind the public site and admin console: news posts,
//! live events, and venues. All text fields are bilingual (ja/en), with
//! Japanese required and English optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Visible publication states for news and lives.
pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";

/// News post row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsPost {
    pub id: Uuid,
    pub slug: String,
    pub title_ja: String,
    pub title_en: Option<String>,
    pub body_ja: Option<String>,
    pub body_en: Option<String>,
    pub category: Option<String>,
    /// "draft" or "published"
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub eyecatch_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Live event row, with the venue name denormalized for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LiveEvent {
    pub id: Uuid,
    pub title_ja: String,
    pub title_en: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub open_time: Option<String>,
    pub start_time: Option<String>,
    pub venue_id: Option<Uuid>,
    pub price_ja: Option<String>,
    pub price_en: Option<String>,
    pub performers_ja: Option<String>,
    pub performers_en: Option<String>,
    pub notes_ja: Option<String>,
    pub notes_en: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined from `venues`; None when no venue is set
    #[sqlx(default)]
    pub venue_name_ja: Option<String>,
    #[sqlx(default)]
    pub venue_name_en: Option<String>,
}

/// Venue row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub name_ja: String,
    pub name_en: Option<String>,
    pub address_ja: Option<String>,
    pub address_en: Option<String>,
}
