//! API response bodies

use serde::Serialize;

use modl_core::domain::TenantSummary;
use modl_core::FieldViolation;

#[derive(Debug, Serialize)]
pub struct ServerDto {
    pub id: String,
    pub name: String,
}

impl From<&TenantSummary> for ServerDto {
    fn from(summary: &TenantSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.server_name.clone(),
        }
    }
}

/// Success body carrying the affected server
#[derive(Debug, Serialize)]
pub struct ServerResponse {
    pub success: bool,
    pub message: String,
    pub server: ServerDto,
}

impl ServerResponse {
    pub fn new(message: &str, summary: &TenantSummary) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            server: ServerDto::from(summary),
        }
    }
}

/// Failure body; `errors` is only present for validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: None,
        }
    }

    pub fn with_errors(message: &str, errors: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: Some(errors),
        }
    }
}
