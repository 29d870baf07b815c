//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// Services and settings shared by every request.
///
/// Both services hold the same store; the state itself carries no link data.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    /// Public base used to build `short_url` in responses.
    pub base_url: String,
}

impl AppState {
    /// Builds the state around a link store.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            redirect_service: Arc::new(RedirectService::new(link_repository)),
            base_url: base_url.into(),
        }
    }
}
