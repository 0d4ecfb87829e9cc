// SPDX-License-Identifier: MIT

//! Fansite API: backend for a bilingual music-act fan site.
//!
//! This crate provides the HTTP API behind the public pages (news, live
//! events) and the point-card loyalty widget, plus the admin console's
//! persisted records.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Db;
use services::PointCardService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub point_card: PointCardService,
}
