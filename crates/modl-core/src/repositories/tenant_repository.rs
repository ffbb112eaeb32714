//! Tenant repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{NewTenant, TenantRecord};
use crate::error::DomainError;

/// Persistence for tenant records.
///
/// Implementations enforce subdomain uniqueness themselves and report a
/// conflict as [`DomainError::SubdomainTaken`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &NewTenant) -> Result<TenantRecord, DomainError>;
    async fn find_by_custom_domain(&self, custom_domain: &str) -> Result<Option<TenantRecord>, DomainError>;
    /// Atomically verifies the tenant holding `token` and clears the token.
    ///
    /// Returns `None` when no unverified tenant currently holds it, so a
    /// token that was already redeemed or replaced never verifies anyone.
    async fn consume_verification_token(&self, token: &str) -> Result<Option<TenantRecord>, DomainError>;
    async fn mark_verification_sent(&self, id: &Uuid, sent_at: DateTime<Utc>) -> Result<(), DomainError>;
    /// Replaces the token and resets `verification_sent_at`.
    async fn replace_verification_token(&self, id: &Uuid, token: &str) -> Result<(), DomainError>;
}
