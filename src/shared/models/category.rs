//! Schedule Category Data Structures
//!
//! A category is a named grouping for scheduling events or documents within
//! a team. Deleting a category that still has events assigned requires an
//! explicit choice: cascade the deletion or reassign the events to another
//! category.

use serde::{Deserialize, Serialize};

/// What a category groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    Schedule,
    Documents,
}

/// A schedule/document category belonging to exactly one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Server-assigned unique id
    pub category_id: i64,
    /// Display name, non-empty
    pub category_name: String,
    pub category_type: CategoryType,
    /// Display color; unset categories render with the empty string
    #[serde(default)]
    pub color: Option<String>,
}

impl Category {
    /// Display color, falling back to the empty string when unset
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or("")
    }
}

/// Body of `POST /category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub team_id: i64,
    pub create_participant_id: i64,
    pub category_name: String,
    pub category_type: CategoryType,
    pub color: String,
}

/// Body of `PUT /category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCategoryRequest {
    pub category_id: i64,
    pub team_id: i64,
    pub update_participant_id: i64,
    pub category_name: String,
    pub category_type: CategoryType,
    pub color: String,
}

/// Body of `DELETE /category`. Reassignment intent travels in the body, not
/// a path parameter: `is_moved` says whether events move to `new_category_id`
/// or are deleted along with the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryRequest {
    pub category_id: i64,
    pub team_id: i64,
    pub participant_id: i64,
    pub is_moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_type_wire_names() {
        assert_eq!(
            serde_json::to_value(CategoryType::Schedule).unwrap(),
            json!("SCHEDULE")
        );
        assert_eq!(
            serde_json::to_value(CategoryType::Documents).unwrap(),
            json!("DOCUMENTS")
        );
    }

    #[test]
    fn test_category_color_fallback() {
        let category: Category = serde_json::from_value(json!({
            "categoryId": 3,
            "categoryName": "Work",
            "categoryType": "SCHEDULE"
        }))
        .unwrap();
        assert_eq!(category.color_or_default(), "");
    }

    #[test]
    fn test_delete_request_body_shape() {
        let request = DeleteCategoryRequest {
            category_id: 1,
            team_id: 7,
            participant_id: 42,
            is_moved: true,
            new_category_id: Some(2),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "categoryId": 1,
                "teamId": 7,
                "participantId": 42,
                "isMoved": true,
                "newCategoryId": 2
            })
        );
    }

    #[test]
    fn test_delete_request_omits_absent_target() {
        let request = DeleteCategoryRequest {
            category_id: 1,
            team_id: 7,
            participant_id: 42,
            is_moved: false,
            new_category_id: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("newCategoryId").is_none());
    }
}
