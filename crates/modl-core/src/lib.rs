//! # modl Core
//! 
//! Domain types, input validation, ports and the registration service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod notifications;
pub mod validation;
pub mod token;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
pub use validation::{validate_registration, FieldViolation};
