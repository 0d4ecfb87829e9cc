// SPDX-License-Identifier: MIT

//! SQLite client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (role lookup for admin checks)
//! - Point-card links (the `user_profile_links` join table)
//! - Group name snapshots
//! - News, lives, and venues (admin console records)

use crate::error::AppError;
use crate::models::{LinkedGroup, LiveEvent, NewsPost, Profile, Venue};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

/// SQLite database client.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database at `url` and run migrations.
    pub async fn new(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        // An in-memory database exists per connection, so the pool must
        // not hand out more than one.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;

        tracing::info!(url, "Database ready");
        Ok(Self { pool })
    }

    /// In-memory database for tests.
    pub async fn new_in_memory() -> Result<Self, AppError> {
        Self::new("sqlite::memory:").await
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a user's profile row (role), if one exists.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, role, created_at FROM profiles WHERE id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Create or update a profile row. The auth provider normally owns
    /// these; this path exists for seeding and tests.
    pub async fn upsert_profile(&self, user_id: &str, role: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO profiles (id, role) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET role = excluded.role",
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ─── Point-Card Link Operations ──────────────────────────────

    /// List a user's links, each with the resolved group name or the
    /// "Group {id}" fallback when no snapshot exists.
    pub async fn list_links(&self, user_id: &str) -> Result<Vec<LinkedGroup>, AppError> {
        let rows = sqlx::query_as::<_, (i64, i64, Option<String>)>(
            "SELECT l.id, l.group_id, g.name
             FROM user_profile_links l
             LEFT JOIN groups g ON g.id = l.group_id
             WHERE l.user_id = ?1
             ORDER BY l.created_at, l.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, group_id, name)| LinkedGroup {
                id,
                group_id,
                group_name: name.unwrap_or_else(|| format!("Group {}", group_id)),
            })
            .collect())
    }

    /// Insert a (user, group) link. Idempotent: a second claim of the
    /// same group collapses on the unique constraint.
    pub async fn upsert_link(&self, user_id: &str, group_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_profile_links (user_id, group_id) VALUES (?1, ?2)
             ON CONFLICT (user_id, group_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(group_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove a (user, group) link under the caller's own identity.
    /// Returns the number of rows removed (0 when no link existed).
    pub async fn unlink_group(&self, user_id: &str, group_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM user_profile_links WHERE user_id = ?1 AND group_id = ?2",
        )
        .bind(user_id)
        .bind(group_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Snapshot a group's display name as reported at link time.
    pub async fn upsert_group(&self, group_id: i64, name: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO groups (id, name) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET name = excluded.name",
        )
        .bind(group_id)
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ─── News Operations ─────────────────────────────────────────

    /// Published news, newest first, paged.
    pub async fn list_published_news(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<NewsPost>, AppError> {
        let posts = sqlx::query_as::<_, NewsPost>(
            "SELECT * FROM news WHERE status = 'published'
             ORDER BY published_at DESC
             LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    /// All news including drafts, newest first (admin listing).
    pub async fn list_all_news(&self) -> Result<Vec<NewsPost>, AppError> {
        let posts =
            sqlx::query_as::<_, NewsPost>("SELECT * FROM news ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(posts)
    }

    pub async fn insert_news(&self, post: &NewsPost) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO news (id, slug, title_ja, title_en, body_ja, body_en, category,
                               status, published_at, eyecatch_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(post.id)
        .bind(&post.slug)
        .bind(&post.title_ja)
        .bind(&post.title_en)
        .bind(&post.body_ja)
        .bind(&post.body_en)
        .bind(&post.category)
        .bind(&post.status)
        .bind(post.published_at)
        .bind(&post.eyecatch_url)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Update all editable fields and bump `updated_at`. Returns false
    /// when no row matched.
    pub async fn update_news(&self, post: &NewsPost) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE news SET slug = ?2, title_ja = ?3, title_en = ?4, body_ja = ?5,
                             body_en = ?6, category = ?7, status = ?8, published_at = ?9,
                             eyecatch_url = ?10, updated_at = ?11
             WHERE id = ?1",
        )
        .bind(post.id)
        .bind(&post.slug)
        .bind(&post.title_ja)
        .bind(&post.title_en)
        .bind(&post.body_ja)
        .bind(&post.body_en)
        .bind(&post.category)
        .bind(&post.status)
        .bind(post.published_at)
        .bind(&post.eyecatch_url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_news(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM news WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ─── Live Operations ─────────────────────────────────────────

    /// Published live events with venue names joined, soonest first.
    pub async fn list_published_lives(&self) -> Result<Vec<LiveEvent>, AppError> {
        let lives = sqlx::query_as::<_, LiveEvent>(
            "SELECT l.*, v.name_ja AS venue_name_ja, v.name_en AS venue_name_en
             FROM lives l
             LEFT JOIN venues v ON v.id = l.venue_id
             WHERE l.status = 'published'
             ORDER BY l.date",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(lives)
    }

    /// All live events including drafts (admin listing).
    pub async fn list_all_lives(&self) -> Result<Vec<LiveEvent>, AppError> {
        let lives = sqlx::query_as::<_, LiveEvent>(
            "SELECT l.*, v.name_ja AS venue_name_ja, v.name_en AS venue_name_en
             FROM lives l
             LEFT JOIN venues v ON v.id = l.venue_id
             ORDER BY l.date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(lives)
    }

    pub async fn insert_live(&self, live: &LiveEvent) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO lives (id, title_ja, title_en, date, open_time, start_time,
                                venue_id, price_ja, price_en, performers_ja, performers_en,
                                notes_ja, notes_en, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .bind(live.id)
        .bind(&live.title_ja)
        .bind(&live.title_en)
        .bind(live.date)
        .bind(&live.open_time)
        .bind(&live.start_time)
        .bind(live.venue_id)
        .bind(&live.price_ja)
        .bind(&live.price_en)
        .bind(&live.performers_ja)
        .bind(&live.performers_en)
        .bind(&live.notes_ja)
        .bind(&live.notes_en)
        .bind(&live.status)
        .bind(live.created_at)
        .bind(live.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update_live(&self, live: &LiveEvent) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE lives SET title_ja = ?2, title_en = ?3, date = ?4, open_time = ?5,
                              start_time = ?6, venue_id = ?7, price_ja = ?8, price_en = ?9,
                              performers_ja = ?10, performers_en = ?11, notes_ja = ?12,
                              notes_en = ?13, status = ?14, updated_at = ?15
             WHERE id = ?1",
        )
        .bind(live.id)
        .bind(&live.title_ja)
        .bind(&live.title_en)
        .bind(live.date)
        .bind(&live.open_time)
        .bind(&live.start_time)
        .bind(live.venue_id)
        .bind(&live.price_ja)
        .bind(&live.price_en)
        .bind(&live.performers_ja)
        .bind(&live.performers_en)
        .bind(&live.notes_ja)
        .bind(&live.notes_en)
        .bind(&live.status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_live(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM lives WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ─── Venue Operations ────────────────────────────────────────

    pub async fn list_venues(&self) -> Result<Vec<Venue>, AppError> {
        let venues = sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY name_ja")
            .fetch_all(&self.pool)
            .await?;
        Ok(venues)
    }

    pub async fn insert_venue(&self, venue: &Venue) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO venues (id, name_ja, name_en, address_ja, address_en)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(venue.id)
        .bind(&venue.name_ja)
        .bind(&venue.name_en)
        .bind(&venue.address_ja)
        .bind(&venue.address_en)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_link_is_idempotent() {
        let db = Db::new_in_memory().await.unwrap();

        db.upsert_link("user-1", 42).await.unwrap();
        db.upsert_link("user-1", 42).await.unwrap();

        let links = db.list_links("user-1").await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].group_id, 42);
    }

    #[tokio::test]
    async fn test_list_links_synthesizes_missing_group_name() {
        let db = Db::new_in_memory().await.unwrap();

        db.upsert_link("user-1", 42).await.unwrap();
        db.upsert_link("user-1", 7).await.unwrap();
        db.upsert_group(7, "Fan Club A").await.unwrap();

        let links = db.list_links("user-1").await.unwrap();
        assert_eq!(links.len(), 2);

        let by_group = |id: i64| links.iter().find(|l| l.group_id == id).unwrap();
        assert_eq!(by_group(42).group_name, "Group 42");
        assert_eq!(by_group(7).group_name, "Fan Club A");
    }

    #[tokio::test]
    async fn test_list_links_empty_for_unknown_user() {
        let db = Db::new_in_memory().await.unwrap();
        let links = db.list_links("nobody").await.unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_unlink_removes_only_that_pair() {
        let db = Db::new_in_memory().await.unwrap();

        db.upsert_link("user-1", 42).await.unwrap();
        db.upsert_link("user-1", 7).await.unwrap();
        db.upsert_link("user-2", 42).await.unwrap();

        let removed = db.unlink_group("user-1", 42).await.unwrap();
        assert_eq!(removed, 1);

        let links = db.list_links("user-1").await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].group_id, 7);

        // Other users' links are untouched
        assert_eq!(db.list_links("user-2").await.unwrap().len(), 1);

        // Unlinking again is a no-op
        assert_eq!(db.unlink_group("user-1", 42).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_profile_role_roundtrip() {
        let db = Db::new_in_memory().await.unwrap();

        assert!(db.get_profile("user-1").await.unwrap().is_none());

        db.upsert_profile("user-1", "admin").await.unwrap();
        let profile = db.get_profile("user-1").await.unwrap().unwrap();
        assert!(profile.is_admin());

        db.upsert_profile("user-1", "user").await.unwrap();
        let profile = db.get_profile("user-1").await.unwrap().unwrap();
        assert!(!profile.is_admin());
    }
}
