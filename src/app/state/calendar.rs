//! Calendar / Event View State
//!
//! Fetches a team's schedules, converts them through a pure mapping into
//! the calendar grid's display schema, and handles the view/edit/delete
//! interactions. Deleting never reloads the whole app: the event list is
//! re-fetched so the grid shows the server's state.

use crate::app::api::ApiClient;
use crate::app::feedback::Feedback;
use crate::app::jobs::{poll_slot, Job, Services};
use crate::shared::models::{
    CreateScheduleRequest, DeleteScheduleRequest, EditScheduleRequest, Schedule, ScheduleType,
};
use crate::shared::ClientError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Fixed message when the server refuses an event delete for permissions.
const DELETE_REFUSED_MESSAGE: &str =
    "The event was created by another team member and can't be deleted with your role.";

/// Input format of the form's date-time fields
const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Extra fields carried with each display event so the detail view can be
/// populated from a grid click alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedProps {
    pub content: String,
    pub place: String,
    pub schedule_type: ScheduleType,
    pub category: Option<String>,
    pub category_name: String,
    pub category_id: i64,
}

/// One event in the calendar grid's display schema
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEvent {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    pub border_color: String,
    pub background_color: String,
    pub extended: ExtendedProps,
}

/// Map backend records into the display schema. Pure and total over
/// well-formed input: one output per input, all detail-view fields
/// preserved, missing colors become the empty string.
pub fn to_display_events(schedules: &[Schedule]) -> Vec<DisplayEvent> {
    schedules
        .iter()
        .map(|schedule| {
            let color = schedule.color.clone().unwrap_or_default();
            DisplayEvent {
                id: schedule.schedule_id,
                start: schedule.start_dt,
                end: schedule.end_dt,
                title: schedule.title.clone(),
                border_color: color.clone(),
                background_color: color,
                extended: ExtendedProps {
                    content: schedule.content.clone(),
                    place: schedule.place.clone(),
                    schedule_type: schedule.schedule_type,
                    category: schedule.category.clone(),
                    category_name: schedule.category_name.clone(),
                    category_id: schedule.category_id,
                },
            }
        })
        .collect()
}

/// Detail-view timestamp, truncated to the minute.
pub fn format_event_time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// First day of the month `delta` months away from `month_start`
pub fn add_months(month_start: NaiveDate, delta: i32) -> NaiveDate {
    let total = month_start.year() * 12 + month_start.month0() as i32 + delta;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(month_start)
}

/// The event whose detail view is open
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedEvent {
    pub id: i64,
    pub title: String,
    pub start: NaiveDateTime,
    pub content: String,
    pub place: String,
    pub category_name: String,
    pub category_id: i64,
}

impl SelectedEvent {
    /// Decode the fields the detail view needs from a grid click
    pub fn from_display(event: &DisplayEvent) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            start: event.start,
            content: event.extended.content.clone(),
            place: event.extended.place.clone(),
            category_name: event.extended.category_name.clone(),
            category_id: event.extended.category_id,
        }
    }
}

/// Inputs of the create/edit event form
#[derive(Debug, Clone)]
pub struct EventForm {
    /// `Some` when editing an existing event
    pub editing_schedule_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub place: String,
    pub start_text: String,
    pub end_text: String,
    pub category_id: Option<i64>,
    pub color: String,
}

impl EventForm {
    /// Blank form pre-filled with the clicked day
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_hms_opt(9, 0, 0).unwrap_or_default();
        let end = date.and_hms_opt(10, 0, 0).unwrap_or_default();
        Self {
            editing_schedule_id: None,
            title: String::new(),
            content: String::new(),
            place: String::new(),
            start_text: start.format(FORM_DATETIME_FORMAT).to_string(),
            end_text: end.format(FORM_DATETIME_FORMAT).to_string(),
            category_id: None,
            color: String::new(),
        }
    }

    /// Form pre-filled from an existing event
    pub fn edit(event: &DisplayEvent) -> Self {
        Self {
            editing_schedule_id: Some(event.id),
            title: event.title.clone(),
            content: event.extended.content.clone(),
            place: event.extended.place.clone(),
            start_text: event.start.format(FORM_DATETIME_FORMAT).to_string(),
            end_text: event.end.format(FORM_DATETIME_FORMAT).to_string(),
            category_id: Some(event.extended.category_id),
            color: event.background_color.clone(),
        }
    }

    /// Validate the form locally; no network call is made on failure.
    fn validated(&self) -> Result<(NaiveDateTime, NaiveDateTime, i64), ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::validation("title", "The event needs a title."));
        }
        let category_id = self
            .category_id
            .ok_or_else(|| ClientError::validation("categoryId", "Pick a category."))?;
        let start = NaiveDateTime::parse_from_str(&self.start_text, FORM_DATETIME_FORMAT)
            .map_err(|_| ClientError::validation("startDt", "Start must look like 2024-01-08T10:00."))?;
        let end = NaiveDateTime::parse_from_str(&self.end_text, FORM_DATETIME_FORMAT)
            .map_err(|_| ClientError::validation("endDt", "End must look like 2024-01-08T11:00."))?;
        if end < start {
            return Err(ClientError::validation("endDt", "The event can't end before it starts."));
        }
        Ok((start, end, category_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationKind {
    Upsert,
    Delete,
}

async fn create_and_refresh(
    api: ApiClient,
    team_id: i64,
    request: CreateScheduleRequest,
) -> Result<Vec<Schedule>, ClientError> {
    api.create_schedule(team_id, &request).await?;
    api.list_schedules(team_id).await
}

async fn edit_and_refresh(
    api: ApiClient,
    team_id: i64,
    request: EditScheduleRequest,
) -> Result<Vec<Schedule>, ClientError> {
    api.edit_schedule(team_id, &request).await?;
    api.list_schedules(team_id).await
}

/// Delete then re-fetch, replacing the original client's full page reload
/// with a targeted refresh.
pub async fn delete_and_refresh(
    api: ApiClient,
    team_id: i64,
    request: DeleteScheduleRequest,
) -> Result<Vec<Schedule>, ClientError> {
    api.delete_schedule(team_id, &request).await?;
    api.list_schedules(team_id).await
}

/// Calendar state for one team
pub struct CalendarState {
    pub team_id: i64,
    pub participant_id: i64,
    pub events: Vec<DisplayEvent>,
    /// First day of the month the grid shows
    pub visible_month: NaiveDate,
    pub selected: Option<SelectedEvent>,
    /// Event id awaiting delete confirmation
    pub pending_delete: Option<i64>,
    pub form: Option<EventForm>,
    list_job: Option<Job<Result<Vec<Schedule>, ClientError>>>,
    mutation: Option<(MutationKind, Job<Result<Vec<Schedule>, ClientError>>)>,
}

impl CalendarState {
    pub fn new(team_id: i64, participant_id: i64, today: NaiveDate) -> Self {
        let visible_month = today.with_day(1).unwrap_or(today);
        Self {
            team_id,
            participant_id,
            events: Vec::new(),
            visible_month,
            selected: None,
            pending_delete: None,
            form: None,
            list_job: None,
            mutation: None,
        }
    }

    /// Re-fetch the team's events
    pub fn refresh(&mut self, services: &Services) {
        let api = services.api.clone();
        let team_id = self.team_id;
        self.list_job = Some(services.spawn(async move { api.list_schedules(team_id).await }));
    }

    /// Grid click on an event: open the detail view. All events open the
    /// same detail UI, past or future.
    pub fn select_event(&mut self, event: &DisplayEvent) {
        self.selected = Some(SelectedEvent::from_display(event));
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.pending_delete = None;
    }

    /// Grid click on an empty day: open the create form pre-filled with
    /// that day.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.form = Some(EventForm::for_date(date));
    }

    /// Open the edit form for the currently selected event
    pub fn edit_selected(&mut self) {
        let Some(selected) = &self.selected else {
            return;
        };
        if let Some(event) = self.events.iter().find(|e| e.id == selected.id) {
            self.form = Some(EventForm::edit(event));
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Ask for confirmation before deleting the selected event
    pub fn request_delete(&mut self) {
        if let Some(selected) = &self.selected {
            self.pending_delete = Some(selected.id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed: issue the delete and a targeted re-fetch.
    pub fn confirm_delete(&mut self, services: &Services) {
        let Some(schedule_id) = self.pending_delete.take() else {
            return;
        };
        let request = DeleteScheduleRequest {
            schedule_id,
            team_id: self.team_id,
            team_participant_id: self.participant_id,
        };
        self.mutation = Some((
            MutationKind::Delete,
            services.spawn(delete_and_refresh(
                services.api.clone(),
                self.team_id,
                request,
            )),
        ));
    }

    /// Submit the create/edit form
    pub fn submit_form(&mut self, services: &Services, feedback: &mut Feedback) {
        let Some(form) = &self.form else {
            return;
        };
        let (start_dt, end_dt, category_id) = match form.validated() {
            Ok(parsed) => parsed,
            Err(error) => {
                feedback.error(&error);
                return;
            }
        };
        let Some(form) = self.form.take() else {
            return;
        };
        let api = services.api.clone();
        let job = match form.editing_schedule_id {
            Some(schedule_id) => {
                let request = EditScheduleRequest {
                    schedule_id,
                    title: form.title,
                    content: form.content,
                    place: form.place,
                    start_dt,
                    end_dt,
                    category_id,
                    team_participant_id: self.participant_id,
                    color: form.color,
                };
                services.spawn(edit_and_refresh(api, self.team_id, request))
            }
            None => {
                let request = CreateScheduleRequest {
                    title: form.title,
                    content: form.content,
                    place: form.place,
                    start_dt,
                    end_dt,
                    category_id,
                    team_participant_id: self.participant_id,
                    color: form.color,
                };
                services.spawn(create_and_refresh(api, self.team_id, request))
            }
        };
        self.mutation = Some((MutationKind::Upsert, job));
    }

    /// Events overlapping one grid day
    pub fn events_on(&self, date: NaiveDate) -> Vec<&DisplayEvent> {
        self.events
            .iter()
            .filter(|event| event.start.date() <= date && date <= event.end.date())
            .collect()
    }

    /// Drain finished jobs; called once per frame
    pub fn poll(&mut self, feedback: &mut Feedback) {
        if let Some(result) = poll_slot(&mut self.list_job) {
            self.apply_list_result(result, feedback);
        }
        let finished = self
            .mutation
            .as_ref()
            .and_then(|(kind, job)| job.poll().map(|result| (*kind, result)));
        if let Some((kind, result)) = finished {
            self.mutation = None;
            self.apply_mutation_result(kind, result, feedback);
        }
    }

    pub fn apply_list_result(
        &mut self,
        result: Result<Vec<Schedule>, ClientError>,
        feedback: &mut Feedback,
    ) {
        match result {
            Ok(schedules) => self.events = to_display_events(&schedules),
            Err(error) => feedback.error(&error),
        }
    }

    fn apply_mutation_result(
        &mut self,
        kind: MutationKind,
        result: Result<Vec<Schedule>, ClientError>,
        feedback: &mut Feedback,
    ) {
        match result {
            Ok(schedules) => {
                self.events = to_display_events(&schedules);
                self.selected = None;
            }
            Err(error) => {
                // Status is inspected: only auth failures get the fixed
                // permission message, everything else its own cause.
                if kind == MutationKind::Delete && error.is_auth() {
                    feedback.error_with_message(&error, DELETE_REFUSED_MESSAGE);
                } else {
                    feedback.error(&error);
                }
            }
        }
    }

    /// Test-visible wrapper for delete outcomes
    pub fn apply_delete_result(
        &mut self,
        result: Result<Vec<Schedule>, ClientError>,
        feedback: &mut Feedback,
    ) {
        self.apply_mutation_result(MutationKind::Delete, result, feedback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(id: i64, category_id: i64, color: Option<&str>) -> Schedule {
        Schedule {
            schedule_id: id,
            title: format!("event {}", id),
            content: "agenda".to_string(),
            place: "Room B".to_string(),
            start_dt: NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            end_dt: NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap(),
            color: color.map(String::from),
            schedule_type: ScheduleType::Simple,
            category_id,
            category_name: "Work".to_string(),
            category: None,
        }
    }

    #[test]
    fn test_mapping_preserves_count_and_category() {
        let records = vec![schedule(1, 3, Some("#7aac7a")), schedule(2, 4, None)];
        let events = to_display_events(&records);
        assert_eq!(events.len(), records.len());
        for (event, record) in events.iter().zip(&records) {
            assert_eq!(event.extended.category_id, record.category_id);
        }
    }

    #[test]
    fn test_missing_color_falls_back_to_empty() {
        let events = to_display_events(&[schedule(1, 3, None)]);
        assert_eq!(events[0].background_color, "");
        assert_eq!(events[0].border_color, "");
    }

    #[test]
    fn test_format_event_time_truncates_to_minute() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 8)
            .unwrap()
            .and_hms_opt(10, 30, 59)
            .unwrap();
        assert_eq!(format_event_time(timestamp), "2024-01-08 10:30");
    }

    #[test]
    fn test_select_event_decodes_detail_fields() {
        let events = to_display_events(&[schedule(7, 3, Some("#fff"))]);
        let mut state = CalendarState::new(1, 10, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        state.select_event(&events[0]);
        let selected = state.selected.as_ref().unwrap();
        assert_eq!(selected.id, 7);
        assert_eq!(selected.place, "Room B");
        assert_eq!(selected.category_id, 3);
    }

    #[test]
    fn test_select_date_prefills_form() {
        let mut state = CalendarState::new(1, 10, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        state.select_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let form = state.form.as_ref().unwrap();
        assert_eq!(form.start_text, "2024-01-15T09:00");
        assert!(form.editing_schedule_id.is_none());
    }

    #[test]
    fn test_delete_needs_confirmation_first() {
        let mut state = CalendarState::new(1, 10, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let events = to_display_events(&[schedule(7, 3, None)]);
        state.events = events.clone();
        state.select_event(&events[0]);
        assert!(state.pending_delete.is_none());
        state.request_delete();
        assert_eq!(state.pending_delete, Some(7));
        state.cancel_delete();
        assert!(state.pending_delete.is_none());
    }

    #[test]
    fn test_delete_auth_failure_gets_fixed_message() {
        let mut state = CalendarState::new(1, 10, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let mut feedback = Feedback::new();
        state.events = to_display_events(&[schedule(7, 3, None)]);
        let before = state.events.clone();

        state.apply_delete_result(Err(ClientError::auth(403, "forbidden")), &mut feedback);

        assert_eq!(state.events, before);
        assert_eq!(feedback.len(), 1);
        assert_eq!(
            feedback.notices().next().unwrap().message,
            DELETE_REFUSED_MESSAGE
        );
    }

    #[test]
    fn test_delete_other_failure_keeps_own_cause() {
        let mut state = CalendarState::new(1, 10, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let mut feedback = Feedback::new();

        state.apply_delete_result(Err(ClientError::network("down")), &mut feedback);

        let message = &feedback.notices().next().unwrap().message;
        assert!(message.contains("Network error"));
    }

    #[test]
    fn test_form_validation() {
        let mut form = EventForm::for_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(form.validated().is_err(), "title missing");
        form.title = "Standup".to_string();
        assert!(form.validated().is_err(), "category missing");
        form.category_id = Some(3);
        assert!(form.validated().is_ok());
        form.end_text = "2024-01-15T08:00".to_string();
        assert!(form.validated().is_err(), "ends before start");
    }

    #[test]
    fn test_add_months_wraps_years() {
        let january = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            add_months(january, -1),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
        assert_eq!(
            add_months(january, 12),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(
            add_months(january, 2),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_events_on_matches_span() {
        let mut record = schedule(1, 3, None);
        record.end_dt = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut state = CalendarState::new(1, 10, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        state.events = to_display_events(&[record]);
        assert_eq!(
            state
                .events_on(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap())
                .len(),
            1
        );
        assert!(state
            .events_on(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap())
            .is_empty());
    }
}
