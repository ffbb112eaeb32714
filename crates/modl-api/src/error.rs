//! API error → HTTP response mapping

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use modl_core::{DomainError, ErrorKind, FieldViolation};

use crate::response::ErrorResponse;

pub const MSG_VALIDATION_FAILED: &str = "Validation failed";
pub const MSG_SUBDOMAIN_TAKEN: &str = "This subdomain is already taken";
pub const MSG_ALREADY_VERIFIED: &str = "This email address has already been verified";
pub const MSG_TENANT_NOT_FOUND: &str = "No server is registered under this subdomain";
pub const MSG_INVALID_TOKEN: &str = "Invalid or expired verification token";
pub const MSG_INTERNAL: &str = "Registration failed. Please try again later.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0:?}")]
    ValidationFailed(Vec<FieldViolation>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The cause is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.kind() {
            ErrorKind::ValidationFailed => match err {
                DomainError::Validation(violations) => ApiError::ValidationFailed(violations),
                other => ApiError::BadRequest(user_message(&other)),
            },
            ErrorKind::DuplicateEntry => ApiError::DuplicateEntry(user_message(&err)),
            ErrorKind::NotFound => ApiError::NotFound(user_message(&err)),
            ErrorKind::InternalError => ApiError::InternalError(err.to_string()),
        }
    }
}

/// Client-facing wording for errors whose kind is safe to expose.
fn user_message(err: &DomainError) -> String {
    match err {
        DomainError::InvalidVerificationToken => MSG_INVALID_TOKEN.into(),
        DomainError::SubdomainTaken { .. } => MSG_SUBDOMAIN_TAKEN.into(),
        DomainError::AlreadyVerified { .. } => MSG_ALREADY_VERIFIED.into(),
        DomainError::TenantNotFound { .. } => MSG_TENANT_NOT_FOUND.into(),
        other => other.to_string(),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationFailed(vec![FieldViolation::new("body", &rejection.body_text())])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::ValidationFailed(violations) => {
                tracing::warn!("Validation failed: {} violation(s)", violations.len());
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_errors(MSG_VALIDATION_FAILED, violations),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(&msg))
            }
            ApiError::DuplicateEntry(msg) => {
                tracing::warn!("Duplicate entry: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new(&msg))
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(&msg))
            }
            ApiError::InternalError(cause) => {
                tracing::error!("Internal error: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(MSG_INTERNAL))
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from(DomainError::SubdomainTaken { subdomain: "acme".into() }),
            ApiError::DuplicateEntry(ref m) if m == MSG_SUBDOMAIN_TAKEN
        ));
        assert!(matches!(
            ApiError::from(DomainError::Validation(vec![FieldViolation::new("email", "bad")])),
            ApiError::ValidationFailed(ref v) if v.len() == 1
        ));
        assert!(matches!(
            ApiError::from(DomainError::EmailDelivery("smtp down".into())),
            ApiError::InternalError(_)
        ));
    }

    #[test]
    fn status_is_chosen_by_domain_error_kind() {
        let errors = [
            DomainError::Validation(vec![FieldViolation::new("email", "bad")]),
            DomainError::InvalidVerificationToken,
            DomainError::SubdomainTaken { subdomain: "acme".into() },
            DomainError::AlreadyVerified { custom_domain: "acme".into() },
            DomainError::TenantNotFound { custom_domain: "ghost".into() },
            DomainError::DatabaseError("down".into()),
            DomainError::EmailDelivery("refused".into()),
            DomainError::Timeout { operation: "verification email", seconds: 10 },
            DomainError::InternalError("boom".into()),
        ];
        for err in errors {
            let expected = match err.kind() {
                ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
                ErrorKind::DuplicateEntry => StatusCode::CONFLICT,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            };
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn internal_errors_keep_cause_for_logging() {
        let err = ApiError::from(DomainError::Timeout { operation: "tenant creation", seconds: 5 });
        assert!(matches!(err, ApiError::InternalError(ref cause) if cause.contains("tenant creation")));
    }

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (ApiError::ValidationFailed(vec![]), StatusCode::BAD_REQUEST),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::DuplicateEntry("x".into()), StatusCode::CONFLICT),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
