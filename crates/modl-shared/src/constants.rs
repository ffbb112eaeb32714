//! Application-wide constants

/// A subdomain becomes a single DNS label.
pub const MAX_SUBDOMAIN_LENGTH: usize = 63;
pub const VERIFICATION_TOKEN_BYTES: usize = 32;
pub const VERIFICATION_EMAIL_SUBJECT: &str = "Verify Your Email Address";
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";
pub const DEFAULT_PERSISTENCE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_EMAIL_TIMEOUT_SECS: u64 = 10;
