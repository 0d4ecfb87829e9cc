// SPDX-License-Identifier: MIT

//! Admin-role authorization middleware.
//!
//! Runs after `require_auth` and checks the authenticated user's row in
//! the `profiles` table. Anything other than `role = 'admin'` (including
//! a missing profile) is rejected with 403.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires the caller to hold the admin role.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    match state.db.get_profile(&user.user_id).await? {
        Some(profile) if profile.is_admin() => Ok(next.run(request).await),
        _ => {
            tracing::warn!(user_id = %user.user_id, "Admin check failed");
            Err(AppError::Forbidden)
        }
    }
}
