//! Values held by the platform's domain caches.

use serde::{Deserialize, Serialize};

/// Student profile record as read from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    pub full_name: String,
    pub grade: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// One question matched by a semantic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticSearchHit {
    pub id: String,
    pub question_text: String,
    pub similarity: f32,
    pub main_topic: String,
}

/// Result set cached per normalized search request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SemanticSearchResults {
    pub questions: Vec<SemanticSearchHit>,
}
