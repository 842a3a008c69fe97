use crate::models::check_dto::CheckOutcome;
use axum::http::StatusCode;

/// Named status assertion evaluated once per iteration. Failures are
/// recorded, never propagated.
#[derive(Debug, Clone)]
pub struct StatusCheck {
    pub name: String,
    pub expected: u16,
}

impl StatusCheck {
    pub fn new(expected: u16) -> StatusCheck {
        StatusCheck {
            name: format!("status is {}", expected),
            expected,
        }
    }

    /// A request that never produced a response fails the check.
    pub fn evaluate(&self, status: Option<StatusCode>) -> CheckOutcome {
        let passed = matches!(status, Some(s) if s.as_u16() == self.expected);
        CheckOutcome {
            name: self.name.clone(),
            passed,
        }
    }
}

pub fn default_checks(expected: u16) -> Vec<StatusCheck> {
    vec![StatusCheck::new(expected)]
}
