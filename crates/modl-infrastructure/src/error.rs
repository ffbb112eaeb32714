//! Adapter setup errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid sender address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email template error: {0}")]
    Template(#[from] handlebars::TemplateError),
}
