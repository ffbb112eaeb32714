// ============================================================================
// modl Infrastructure - PostgreSQL Tenant Repository
// File: crates/modl-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use modl_core::domain::{NewTenant, Plan, TenantRecord};
use modl_core::error::DomainError;
use modl_core::repositories::TenantRepository;

/// Unique index guarding subdomains; see the migrations directory.
pub const CUSTOM_DOMAIN_UNIQUE_INDEX: &str = "tenant_servers_custom_domain_key";

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantServerRow {
    pub id: Uuid,
    pub admin_email: String,
    pub server_name: String,
    pub custom_domain: String,
    pub plan: String,
    pub email_verification_token: Option<String>,
    pub email_verified: bool,
    pub verification_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl TryFrom<TenantServerRow> for TenantRecord {
    type Error = DomainError;

    fn try_from(row: TenantServerRow) -> Result<Self, Self::Error> {
        let plan = Plan::parse(&row.plan).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown plan {:?} for tenant {}", row.plan, row.id))
        })?;
        Ok(TenantRecord {
            id: row.id,
            admin_email: row.admin_email,
            server_name: row.server_name,
            custom_domain: row.custom_domain,
            plan,
            email_verification_token: row.email_verification_token,
            email_verified: row.email_verified,
            verification_sent_at: row.verification_sent_at,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

/// Maps an insert failure, turning a subdomain unique violation into
/// [`DomainError::SubdomainTaken`].
fn map_insert_error(e: sqlx::Error, subdomain: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() && db_err.constraint() == Some(CUSTOM_DOMAIN_UNIQUE_INDEX) {
            return DomainError::SubdomainTaken {
                subdomain: subdomain.to_string(),
            };
        }
    }
    error!("Database error creating tenant: {}", e);
    DomainError::DatabaseError(e.to_string())
}

fn map_query_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn create(&self, tenant: &NewTenant) -> Result<TenantRecord, DomainError> {
        info!("Creating tenant for subdomain: {}", tenant.custom_domain);

        let row: TenantServerRow = sqlx::query_as(
            r#"
            INSERT INTO tenant_servers (
                id, admin_email, server_name, custom_domain, plan,
                email_verification_token, email_verified, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, admin_email, server_name, custom_domain, plan,
                email_verification_token, email_verified, verification_sent_at,
                created_at, modified_at
            "#
        )
        .bind(tenant.id)
        .bind(&tenant.admin_email)
        .bind(&tenant.server_name)
        .bind(&tenant.custom_domain)
        .bind(tenant.plan.as_str())
        .bind(&tenant.email_verification_token)
        .bind(tenant.email_verified)
        .bind(tenant.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &tenant.custom_domain))?;

        info!("Tenant created successfully: {}", row.id);
        row.try_into()
    }

    async fn find_by_custom_domain(&self, custom_domain: &str) -> Result<Option<TenantRecord>, DomainError> {
        let row: Option<TenantServerRow> = sqlx::query_as(
            r#"
            SELECT
                id, admin_email, server_name, custom_domain, plan,
                email_verification_token, email_verified, verification_sent_at,
                created_at, modified_at
            FROM tenant_servers
            WHERE LOWER(custom_domain) = LOWER($1)
            "#
        )
        .bind(custom_domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_error("finding tenant by subdomain"))?;

        row.map(TenantRecord::try_from).transpose()
    }

    async fn consume_verification_token(&self, token: &str) -> Result<Option<TenantRecord>, DomainError> {
        // Match and clear in one statement so a token can only be redeemed once.
        let row: Option<TenantServerRow> = sqlx::query_as(
            r#"
            UPDATE tenant_servers
            SET
                email_verified = TRUE,
                email_verification_token = NULL,
                modified_at = NOW()
            WHERE email_verification_token = $1 AND email_verified = FALSE
            RETURNING
                id, admin_email, server_name, custom_domain, plan,
                email_verification_token, email_verified, verification_sent_at,
                created_at, modified_at
            "#
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_error("consuming verification token"))?;

        row.map(TenantRecord::try_from).transpose()
    }

    async fn mark_verification_sent(&self, id: &Uuid, sent_at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE tenant_servers
            SET verification_sent_at = $2, modified_at = NOW()
            WHERE id = $1
            "#
        )
        .bind(id)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_query_error("recording verification dispatch"))?;

        Ok(())
    }

    async fn replace_verification_token(&self, id: &Uuid, token: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tenant_servers
            SET
                email_verification_token = $2,
                verification_sent_at = NULL,
                modified_at = NOW()
            WHERE id = $1 AND email_verified = FALSE
            "#
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_query_error("replacing verification token"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DatabaseError(format!(
                "no unverified tenant with id {}",
                id
            )));
        }
        Ok(())
    }
}
