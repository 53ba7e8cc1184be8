//! Click event model for asynchronous click counting.

/// A redirect that still has to be counted.
///
/// Created by the redirect handler and sent through a bounded channel to
/// [`crate::domain::click_worker::run_click_worker`], so the redirect response
/// does not wait on the counter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub code: String,
}

impl ClickEvent {
    pub fn new(link_id: i64, code: impl Into<String>) -> Self {
        Self {
            link_id,
            code: code.into(),
        }
    }
}
