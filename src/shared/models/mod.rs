//! Wire models for the collaboration backend.
//!
//! One file per entity. Field names are serialized in the backend's
//! camelCase convention.

pub mod category;
pub mod document;
pub mod member;
pub mod schedule;
pub mod team;

pub use category::{
    Category, CategoryType, CreateCategoryRequest, DeleteCategoryRequest, EditCategoryRequest,
};
pub use document::{CreateDocumentRequest, Document};
pub use member::{PasswordChangeRequest, SignInRequest, UserProfile};
pub use schedule::{
    CreateScheduleRequest, DeleteScheduleRequest, EditScheduleRequest, Schedule, ScheduleType,
};
pub use team::{Team, TeamParticipant, TeamRole};

use serde::{Deserialize, Serialize};

/// One page of a paginated listing. The backend wraps list responses in a
/// page object; only the `content` array is consumed client-side, and its
/// absence is a decode error rather than an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
}
