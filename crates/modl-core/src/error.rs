//! Domain errors

use thiserror::Error;

use crate::validation::FieldViolation;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Subdomain already taken: {subdomain}")]
    SubdomainTaken { subdomain: String },

    #[error("Tenant not found: {custom_domain}")]
    TenantNotFound { custom_domain: String },

    #[error("Invalid verification token")]
    InvalidVerificationToken,

    #[error("Email already verified for tenant: {custom_domain}")]
    AlreadyVerified { custom_domain: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Email delivery failed: {0}")]
    EmailDelivery(String),

    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: &'static str, seconds: u64 },

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Caller-facing classification of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    DuplicateEntry,
    NotFound,
    InternalError,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) | DomainError::InvalidVerificationToken => {
                ErrorKind::ValidationFailed
            }
            DomainError::SubdomainTaken { .. } | DomainError::AlreadyVerified { .. } => {
                ErrorKind::DuplicateEntry
            }
            DomainError::TenantNotFound { .. } => ErrorKind::NotFound,
            DomainError::DatabaseError(_)
            | DomainError::EmailDelivery(_)
            | DomainError::Timeout { .. }
            | DomainError::InternalError(_) => ErrorKind::InternalError,
        }
    }
}
