//! HTTP middleware and request identification.
//!
//! Provides caller identification, CORS handling, and observability middleware.

pub mod auth;
pub mod cors;
pub mod tracing;
