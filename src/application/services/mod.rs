//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use link_service::{LinkService, MAX_ALLOCATION_ATTEMPTS};
pub use token_service::{Claims, TokenService};
