//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short code generation
//! - [`password`] - Password hashing and verification
//! - [`client_ip`] - Client address resolution from HTTP requests

pub mod client_ip;
pub mod code_generator;
pub mod password;
