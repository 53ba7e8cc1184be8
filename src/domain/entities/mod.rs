//! Core domain entities representing the business data model.
//!
//! - [`Link`] - A shortened URL mapping
//! - [`User`] - A registered account
//! - [`Identity`] - The caller of a request, anonymous or authenticated
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewLink`, `NewUser`).

pub mod identity;
pub mod link;
pub mod user;

pub use identity::Identity;
pub use link::{Link, NewLink};
pub use user::{NewUser, PublicUser, User};
