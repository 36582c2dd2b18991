//! Shared Document Data Structures

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A shared document. Created through the document endpoint, listed with
/// pagination, opened for realtime editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document store id (opaque string)
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub team_id: Option<i64>,
    /// Ids of comments attached to this document
    #[serde(default)]
    pub comments_id: Vec<String>,
    #[serde(default)]
    pub created_dt: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_dt: Option<NaiveDateTime>,
}

impl Document {
    /// Case-insensitive match against title or content, used by the list
    /// view's client-side filter.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.content.to_lowercase().contains(&term)
    }

    /// Short content preview for list rows
    pub fn preview(&self) -> String {
        const PREVIEW_LEN: usize = 20;
        if self.content.chars().count() <= PREVIEW_LEN {
            self.content.clone()
        } else {
            let cut: String = self.content.chars().take(PREVIEW_LEN).collect();
            format!("{}...", cut)
        }
    }
}

/// Body of `POST /team/{teamId}/documents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub title: String,
    pub content: String,
}
