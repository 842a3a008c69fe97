use serde::{Deserialize, Serialize};

/// Body posted on every iteration. Built fresh each time and discarded once
/// the request completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlePayload {
    pub user: String,
    pub file: String,
}
