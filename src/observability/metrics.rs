//! Metrics collection.
//!
//! # Metrics
//! - `route_guard_requests_total` (counter): requests seen by the interceptor, by outcome
//! - `route_guard_protected_handlers` (gauge): protected handlers in the live registry
//! - `route_guard_reloads_total` (counter): registry reloads, by result

use metrics::{counter, gauge};

/// What the interceptor did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Handler not protected; passed through without a check.
    Open,
    /// Protected handler, credentials accepted.
    Allowed,
    /// Protected handler, credentials missing or rejected.
    Rejected,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Open => "open",
            Outcome::Allowed => "allowed",
            Outcome::Rejected => "rejected",
        }
    }
}

pub fn record_request(outcome: Outcome) {
    counter!("route_guard_requests_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn set_protected_handlers(count: usize) {
    gauge!("route_guard_protected_handlers").set(count as f64);
}

pub fn record_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("route_guard_reloads_total", "result" => result).increment(1);
}
