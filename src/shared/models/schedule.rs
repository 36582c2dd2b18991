//! Schedule (Calendar Event) Data Structures

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kind of schedule record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleType {
    #[default]
    Simple,
    Repeat,
}

/// A calendar event as returned by `GET /team/{teamId}/schedules/calendar`.
/// Timestamps are the backend's naive local date-times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub schedule_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub place: String,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub schedule_type: ScheduleType,
    pub category_id: i64,
    /// Denormalized category name carried with each record
    #[serde(default)]
    pub category_name: String,
    /// The category's type descriptor, when the backend includes it
    #[serde(default)]
    pub category: Option<String>,
}

/// Body of `POST /team/{teamId}/schedules/simple`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub title: String,
    pub content: String,
    pub place: String,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub category_id: i64,
    pub team_participant_id: i64,
    pub color: String,
}

/// Body of `PUT /team/{teamId}/schedules/simple`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditScheduleRequest {
    pub schedule_id: i64,
    pub title: String,
    pub content: String,
    pub place: String,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub category_id: i64,
    pub team_participant_id: i64,
    pub color: String,
}

/// Body of `DELETE /team/{teamId}/schedules/simple/{scheduleId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteScheduleRequest {
    pub schedule_id: i64,
    pub team_id: i64,
    pub team_participant_id: i64,
}
