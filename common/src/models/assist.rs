//! Assist endpoint models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for the assist endpoint.
///
/// No field validation beyond type checking: an empty or whitespace-only
/// question is accepted and answered with the prompt-for-more fallback.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuestionRequest {
    /// Free-text question.
    pub question: String,

    /// Optional extra context. Accepted but not consumed by the rule
    /// engine in its current form.
    #[serde(default)]
    pub context: Option<String>,
}

/// Canned answer returned by the assist endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssistAnswer {
    /// Answer text.
    pub answer: String,
}
