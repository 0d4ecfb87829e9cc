// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod content;
pub mod link;
pub mod pointcard;
pub mod profile;

pub use content::{LiveEvent, NewsPost, Venue};
pub use link::LinkedGroup;
pub use pointcard::{LevelInfo, PointCardData, Rarity, RawCardData, RawTrophy, Trophy};
pub use profile::Profile;
