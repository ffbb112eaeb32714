// ============================================================================
// modl Core - Registration Types
// File: crates/modl-core/src/domain/registration.rs
// ============================================================================

use serde::Serialize;

use modl_shared::constants::VERIFICATION_EMAIL_SUBJECT;
use modl_shared::Plan;

/// A registration payload that passed validation.
///
/// Produced only by [`crate::validation::validate_registration`]; the terms
/// flag is not carried because it can only ever be `true` here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub server_name: String,
    /// Lowercased subdomain label.
    pub custom_domain: String,
    pub plan: Plan,
}

/// Outbound verification message handed to an [`crate::notifications::EmailSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub to: String,
    pub subject: String,
    pub server_name: String,
    pub subdomain: String,
    pub link: String,
}

impl VerificationEmail {
    pub fn new(to: &str, server_name: &str, subdomain: &str, link: String) -> Self {
        Self {
            to: to.to_string(),
            subject: VERIFICATION_EMAIL_SUBJECT.to_string(),
            server_name: server_name.to_string(),
            subdomain: subdomain.to_string(),
            link,
        }
    }
}
