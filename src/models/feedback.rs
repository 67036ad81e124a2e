use serde::{Deserialize, Serialize};

use super::SearchQuery;

/// Pass/fail verdict on whether a section's content covers its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Pass,
    Fail,
}

/// Result of one grading pass over a section draft.
///
/// `follow_up_queries` is only meaningful on a failing grade, and may
/// legitimately be empty even then (the grader found gaps but proposed no
/// new searches).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub grade: Grade,
    #[serde(default)]
    pub follow_up_queries: Vec<SearchQuery>,
}
