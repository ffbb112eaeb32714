//! # modl Infrastructure
//! 
//! Database and mail transport implementations (adapters).

pub mod database;
pub mod email;
pub mod error;

pub use database::{create_pool, run_migrations, PgTenantRepository};
pub use email::SmtpEmailSender;
pub use error::InfrastructureError;
