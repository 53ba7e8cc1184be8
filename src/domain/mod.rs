//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves the short code
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies the increment with retry logic

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
