//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs deserialize with Serde and validate with `validator`;
//! response DTOs serialize field names in camelCase.

pub mod auth;
pub mod health;
pub mod links;
