// SPDX-License-Identifier: MIT

//! Point-card display models and the raw edge-function shapes they are
//! normalized from.
//!
//! Level and trophy data are read-through views: fetched fresh on every
//! request, never persisted. The arithmetic between points and level
//! lives entirely in the loyalty service; the numbers are opaque here.

use serde::{Deserialize, Serialize};

/// Trophy rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Parse an upstream rarity string, defaulting to `Common` for
    /// missing or unknown values rather than failing the whole payload.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("rare") => Rarity::Rare,
            Some("epic") => Rarity::Epic,
            Some("legendary") => Rarity::Legendary,
            _ => Rarity::Common,
        }
    }
}

/// A user's standing within a loyalty group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelInfo {
    pub level: i64,
    pub total_points: i64,
    pub next_remaining: i64,
}

/// One achievement definition plus the current user's progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trophy {
    /// Stable within one response only. Synthesized from the array
    /// position when the upstream omits it; never compared across
    /// fetches.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rarity: Rarity,
    pub achieved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved_at: Option<String>,
}

/// Normalized fetch response: level fields flattened alongside the
/// trophy list, matching what the point-card widget consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointCardData {
    #[serde(flatten)]
    pub level_info: LevelInfo,
    pub trophies: Vec<Trophy>,
}

// ─── Raw upstream shapes ─────────────────────────────────────

/// Fetch response as the edge function returns it. Every field defaults
/// so a sparse payload still deserializes.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCardData {
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub next_remaining: i64,
    #[serde(default)]
    pub trophies: Vec<RawTrophy>,
}

/// One trophy entry as the edge function returns it. `earned` is the
/// upstream name for what the display model calls `achieved`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTrophy {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Kept as a loose string so unknown tiers degrade to `Common`
    /// instead of rejecting the payload.
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub earned: bool,
    #[serde(default)]
    pub achieved_at: Option<String>,
}
