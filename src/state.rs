//! Shared application state injected into handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService, TokenService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{LinkRepository, UserRepository};

/// State cloned into every request.
///
/// Services are built over repository trait objects, so the same state type
/// serves PostgreSQL in production and in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub token_service: Arc<TokenService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        user_repository: Arc<dyn UserRepository>,
        token_service: Arc<TokenService>,
        base_url: &str,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(user_repository, token_service.clone())),
            link_service: Arc::new(LinkService::new(link_repository, base_url)),
            token_service,
            click_sender,
        }
    }
}
