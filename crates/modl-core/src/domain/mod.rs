//! # modl Core - Domain Module
//! 
//! Domain entities for the registration flow.

pub mod registration;
pub mod tenant;

pub use modl_shared::Plan;
pub use registration::{RegistrationRequest, VerificationEmail};
pub use tenant::{NewTenant, TenantRecord, TenantSummary};
