//! Email verification handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{ApiError, MSG_INVALID_TOKEN};
use crate::response::ServerResponse;
use crate::state::AppState;

pub const MSG_VERIFIED: &str = "Email verified. Your moderation panel is ready.";

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

/// Verify handler - GET /api/verify-email?token=...
///
/// Emailed links open `/verify-email` on the tenant's subdomain; that client
/// page forwards the token here.
pub async fn verify_email(
    State(state): State<AppState>,
    query: Result<Query<VerifyEmailQuery>, QueryRejection>,
) -> Result<Json<ServerResponse>, ApiError> {
    let Query(query) = query?;
    let token = query
        .token
        .ok_or_else(|| ApiError::BadRequest(MSG_INVALID_TOKEN.into()))?;

    let summary = state.registration.verify_email(&token).await?;

    Ok(Json(ServerResponse::new(MSG_VERIFIED, &summary)))
}
