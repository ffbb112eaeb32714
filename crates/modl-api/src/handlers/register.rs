// ============================================================================
// modl API - Registration Handlers
// File: crates/modl-api/src/handlers/register.rs
// ============================================================================
//! Registration HTTP handlers (register, resend verification)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use modl_core::{validate_registration, DomainError};

use crate::error::ApiError;
use crate::response::ServerResponse;
use crate::state::AppState;

pub const MSG_REGISTERED: &str =
    "Registration successful. Please check your email to verify your address.";
pub const MSG_VERIFICATION_RESENT: &str = "Verification email sent. Please check your inbox.";

/// Resend request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    pub custom_domain: String,
}

/// Register handler - POST /api/register
///
/// The body is taken as raw JSON so every field problem can be reported,
/// not just the first one serde trips over.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ServerResponse>), ApiError> {
    let Json(payload) = payload?;
    let request = validate_registration(&payload).map_err(DomainError::Validation)?;

    let summary = state.registration.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ServerResponse::new(MSG_REGISTERED, &summary)),
    ))
}

/// Resend handler - POST /api/register/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    payload: Result<Json<ResendVerificationRequest>, JsonRejection>,
) -> Result<Json<ServerResponse>, ApiError> {
    let Json(payload) = payload?;
    if payload.custom_domain.trim().is_empty() {
        return Err(ApiError::BadRequest("Subdomain is required".into()));
    }

    let summary = state
        .registration
        .resend_verification(&payload.custom_domain)
        .await?;

    Ok(Json(ServerResponse::new(MSG_VERIFICATION_RESENT, &summary)))
}
