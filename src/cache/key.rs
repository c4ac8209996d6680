//! Cache Key Helpers
//!
//! Builds the colon-separated keys each cache domain is addressed with.

use std::fmt::Display;

/// Joins `prefix` and `parts` into `prefix:part1:part2...`.
pub fn create_cache_key<I, P>(prefix: &str, parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: Display,
{
    let mut key = prefix.to_string();
    for part in parts {
        key.push(':');
        key.push_str(&part.to_string());
    }
    key
}

/// Normalizes free-form request text so equivalent requests share a key.
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Key for a memoized AI generation response.
pub fn ai_cache_key<I, P>(endpoint: &str, parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: Display,
{
    create_cache_key(&format!("ai:{endpoint}"), parts)
}

/// Key for the embedding of a search query.
pub fn embedding_cache_key(query: &str) -> String {
    create_cache_key("embedding", [normalize_query(query)])
}

/// Key for a semantic search result set.
///
/// Missing filters are rendered as `all`.
pub fn semantic_search_cache_key(
    query: &str,
    grade: Option<u8>,
    subject_code: Option<&str>,
    threshold: f32,
) -> String {
    let grade = grade.map_or_else(|| "all".to_string(), |g| g.to_string());
    let subject = subject_code.unwrap_or("all").to_string();

    create_cache_key(
        "semantic-search",
        [normalize_query(query), grade, subject, threshold.to_string()],
    )
}

/// Key for a student's computed analysis.
pub fn student_analysis_cache_key(student_id: &str) -> String {
    create_cache_key("student-analysis", [student_id])
}

/// Key for a student's profile record.
pub fn profile_cache_key(student_id: &str) -> String {
    create_cache_key("profile", [student_id])
}
