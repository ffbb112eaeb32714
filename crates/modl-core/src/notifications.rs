//! Outbound email port

use async_trait::async_trait;

use crate::domain::VerificationEmail;
use crate::error::DomainError;

/// Sends transactional email. Failures are reported as
/// [`DomainError::EmailDelivery`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &VerificationEmail) -> Result<(), DomainError>;
}
