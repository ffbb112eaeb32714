// ============================================================================
// modl Core - Registration Service
// File: crates/modl-core/src/services/registration_service.rs
// ============================================================================
//! Registration orchestration: tenant creation, verification email,
//! verification and manual resend.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use modl_shared::config::RegistrationSettings;
use modl_shared::utils::{mask_email, token_fingerprint};

use crate::domain::{NewTenant, RegistrationRequest, TenantRecord, TenantSummary, VerificationEmail};
use crate::error::DomainError;
use crate::notifications::EmailSender;
use crate::repositories::TenantRepository;
use crate::token::{generate_verification_token, verification_link};

/// Owns tenant creation for the registration flow.
///
/// Collaborators are injected; the service keeps no mutable state of its
/// own, so one instance serves all requests.
pub struct RegistrationService<R: ?Sized, M: ?Sized> {
    tenant_repo: Arc<R>,
    mailer: Arc<M>,
    settings: RegistrationSettings,
}

impl<R, M> RegistrationService<R, M>
where
    R: TenantRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub fn new(tenant_repo: Arc<R>, mailer: Arc<M>, settings: RegistrationSettings) -> Self {
        Self {
            tenant_repo,
            mailer,
            settings,
        }
    }

    /// Register a new server from a validated request
    pub async fn register(&self, request: RegistrationRequest) -> Result<TenantSummary, DomainError> {
        info!(
            email = %mask_email(&request.email),
            subdomain = %request.custom_domain,
            plan = %request.plan,
            "Registration attempt"
        );

        // 1. Token
        let token = generate_verification_token();

        // 2. Tenant record
        let new_tenant = NewTenant::from_request(&request, token.clone());
        let tenant = self
            .persist("tenant creation", self.tenant_repo.create(&new_tenant))
            .await
            .inspect_err(|e| match e {
                DomainError::SubdomainTaken { subdomain } => {
                    warn!(subdomain = %subdomain, "Registration rejected: subdomain already taken");
                }
                other => error!(error = %other, "Registration failed while creating tenant"),
            })?;

        info!(tenant_id = %tenant.id, subdomain = %tenant.custom_domain, "Tenant created");

        // 3. Verification email; the tenant stays in place if this fails.
        self.dispatch_verification(&tenant, &token).await?;

        info!(tenant_id = %tenant.id, "Registration successful");
        Ok(TenantSummary::from(&tenant))
    }

    /// Redeem a verification token.
    ///
    /// The emailed link points at the tenant's `/verify-email` client page,
    /// which forwards the token to `GET /api/verify-email`.
    pub async fn verify_email(&self, token: &str) -> Result<TenantSummary, DomainError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::InvalidVerificationToken);
        }

        let verified = self
            .persist(
                "email verification",
                self.tenant_repo.consume_verification_token(token),
            )
            .await?
            .ok_or_else(|| {
                warn!(token = %token_fingerprint(token), "Verification failed: unknown token");
                DomainError::InvalidVerificationToken
            })?;

        info!(tenant_id = %verified.id, "Email verified");
        Ok(TenantSummary::from(&verified))
    }

    /// Issue a fresh token and send the verification email again.
    ///
    /// This is the compensating path for tenants whose first email never went
    /// out; nothing calls it automatically.
    pub async fn resend_verification(&self, custom_domain: &str) -> Result<TenantSummary, DomainError> {
        let custom_domain = custom_domain.trim().to_lowercase();

        let tenant = self
            .persist(
                "tenant lookup",
                self.tenant_repo.find_by_custom_domain(&custom_domain),
            )
            .await?
            .ok_or_else(|| DomainError::TenantNotFound {
                custom_domain: custom_domain.clone(),
            })?;

        if tenant.email_verified {
            warn!(tenant_id = %tenant.id, "Resend rejected: email already verified");
            return Err(DomainError::AlreadyVerified { custom_domain });
        }

        let token = generate_verification_token();
        self.persist(
            "verification token replacement",
            self.tenant_repo.replace_verification_token(&tenant.id, &token),
        )
        .await?;

        self.dispatch_verification(&tenant, &token).await?;

        info!(tenant_id = %tenant.id, "Verification email resent");
        Ok(TenantSummary::from(&tenant))
    }

    async fn dispatch_verification(&self, tenant: &TenantRecord, token: &str) -> Result<(), DomainError> {
        let link = verification_link(
            &self.settings.verification_scheme,
            &tenant.custom_domain,
            &self.settings.verification_domain,
            token,
        );
        let email = VerificationEmail::new(
            &tenant.admin_email,
            &tenant.server_name,
            &tenant.custom_domain,
            link,
        );

        let limit = self.settings.email_timeout();
        bounded("verification email", limit, self.mailer.send(&email))
            .await
            .inspect_err(|e| {
                error!(
                    tenant_id = %tenant.id,
                    to = %mask_email(&tenant.admin_email),
                    error = %e,
                    "Verification email failed; tenant left unverified pending resend"
                );
            })?;

        // Losing this timestamp only makes the tenant look like it needs a resend.
        if let Err(e) = self
            .persist(
                "verification sent marker",
                self.tenant_repo.mark_verification_sent(&tenant.id, Utc::now()),
            )
            .await
        {
            warn!(tenant_id = %tenant.id, error = %e, "Failed to record verification email dispatch");
        }

        Ok(())
    }

    async fn persist<T, F>(&self, operation: &'static str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        bounded(operation, self.settings.persistence_timeout(), fut).await
    }
}

async fn bounded<T, F>(operation: &'static str, limit: Duration, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::Timeout {
            operation,
            seconds: limit.as_secs(),
        }),
    }
}
