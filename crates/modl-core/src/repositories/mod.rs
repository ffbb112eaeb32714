//! Repository traits (ports)

pub mod tenant_repository;

pub use tenant_repository::TenantRepository;

#[cfg(test)]
pub use tenant_repository::MockTenantRepository;
