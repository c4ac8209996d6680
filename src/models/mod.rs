//! Data models: cached domain values and the diagnostics API's DTOs.

pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use domain::{SemanticSearchHit, SemanticSearchResults, StudentProfile};
pub use requests::SetEntryRequest;
pub use responses::{
    CachesResponse, ClearResponse, CleanupResponse, DeleteResponse, EntryResponse,
    ErrorResponse, HealthResponse, SetEntryResponse,
};
