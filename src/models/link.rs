// SPDX-License-Identifier: MIT

//! Point-card link records.

use serde::{Deserialize, Serialize};

/// A link joined with its resolved group name, as listed to the owner.
/// Backed by `user_profile_links`, which holds at most one row per
/// (user, group) pair.
///
/// `group_name` comes from the local `groups` snapshot when present and
/// falls back to a synthesized "Group {id}" otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkedGroup {
    /// Link row id
    pub id: i64,
    pub group_id: i64,
    pub group_name: String,
}
