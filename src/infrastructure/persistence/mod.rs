//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Short links and click counters (`urls`)
//! - [`PgUserRepository`] - Registered accounts (`users`)

pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
