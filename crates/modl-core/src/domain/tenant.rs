// ============================================================================
// modl Core - Tenant Entity
// File: crates/modl-core/src/domain/tenant.rs
// Description: Registered server (tenant) and its creation input
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use modl_shared::{new_id, Plan};

use super::registration::RegistrationRequest;

/// Persisted tenant record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub id: Uuid,
    pub admin_email: String,
    pub server_name: String,
    /// Unique across all tenants, compared case-insensitively.
    pub custom_domain: String,
    pub plan: Plan,
    /// Cleared once the token has been redeemed.
    pub email_verification_token: Option<String>,
    pub email_verified: bool,
    /// `None` until a verification email was actually handed to the relay.
    pub verification_sent_at: Option<DateTime<Utc>>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl TenantRecord {
    /// Unverified tenants whose last verification email never went out.
    pub fn needs_verification_resend(&self) -> bool {
        !self.email_verified && self.verification_sent_at.is_none()
    }
}

/// Input for tenant creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTenant {
    pub id: Uuid,
    pub admin_email: String,
    pub server_name: String,
    pub custom_domain: String,
    pub plan: Plan,
    pub email_verification_token: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl NewTenant {
    pub fn from_request(request: &RegistrationRequest, email_verification_token: String) -> Self {
        Self {
            id: new_id(),
            admin_email: request.email.clone(),
            server_name: request.server_name.clone(),
            custom_domain: request.custom_domain.clone(),
            plan: request.plan,
            email_verification_token,
            email_verified: false,
            created_at: Utc::now(),
        }
    }
}

/// What callers get back about a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantSummary {
    pub id: Uuid,
    pub server_name: String,
    pub custom_domain: String,
    pub plan: Plan,
    pub email_verified: bool,
}

impl From<&TenantRecord> for TenantSummary {
    fn from(tenant: &TenantRecord) -> Self {
        Self {
            id: tenant.id,
            server_name: tenant.server_name.clone(),
            custom_domain: tenant.custom_domain.clone(),
            plan: tenant.plan,
            email_verified: tenant.email_verified,
        }
    }
}
