// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod loyalty;

pub use loyalty::{LoyaltyClient, PointCardService};
