//! # modl API
//! 
//! HTTP handlers, error mapping, response bodies and routing.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
