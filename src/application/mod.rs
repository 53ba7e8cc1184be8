//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP
//! handlers and the admin CLI call into.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and listing
//! - [`services::auth_service::AuthService`] - Account registration and login
//! - [`services::token_service::TokenService`] - Session token issuing and verification

pub mod services;
