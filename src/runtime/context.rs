use super::SessionService;

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    session_service: SessionService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_service(&self) -> &SessionService {
        &self.session_service
    }
}
