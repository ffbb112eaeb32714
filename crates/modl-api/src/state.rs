use std::sync::Arc;

use modl_core::notifications::EmailSender;
use modl_core::repositories::TenantRepository;
use modl_core::services::RegistrationService;

/// Registration service over type-erased adapters
pub type SharedRegistrationService = RegistrationService<dyn TenantRepository, dyn EmailSender>;

#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<SharedRegistrationService>,
}

impl AppState {
    pub fn new(registration: SharedRegistrationService) -> Self {
        Self {
            registration: Arc::new(registration),
        }
    }
}
