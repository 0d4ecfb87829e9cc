//! Request middleware.

pub mod admin;
pub mod auth;
pub mod security;
