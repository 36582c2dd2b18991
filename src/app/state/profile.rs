//! Profile Manager State
//!
//! Two panes: the user's own profile (with password change) and the
//! per-team participant profile (nickname, avatar, team departure). No
//! optimistic updates anywhere: mutations re-fetch on success.

use crate::app::api::{AvatarUpload, ParticipantProfileUpdate};
use crate::app::feedback::Feedback;
use crate::app::jobs::{poll_slot, Job, Services};
use crate::shared::models::{PasswordChangeRequest, Team, TeamParticipant, UserProfile};
use crate::shared::ClientError;
use std::path::Path;

/// Both profile panes
pub struct ProfilePane {
    pub user: UserProfileState,
    pub team: TeamProfileState,
}

impl ProfilePane {
    pub fn new() -> Self {
        Self {
            user: UserProfileState::new(),
            team: TeamProfileState::new(),
        }
    }

    pub fn refresh(&mut self, services: &Services) {
        self.user.refresh(services);
        self.team.refresh(services);
    }

    pub fn poll(&mut self, feedback: &mut Feedback) {
        self.user.poll();
        self.team.poll(feedback);
    }
}

impl Default for ProfilePane {
    fn default() -> Self {
        Self::new()
    }
}

/// The user's own profile plus the password-change form. Failures here are
/// rendered inline rather than as notices, with the cause distinguished.
pub struct UserProfileState {
    pub user: Option<UserProfile>,
    pub error: Option<String>,
    /// Teams shown under the profile, in creation order
    pub teams: Vec<Team>,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub password_error: Option<String>,
    pub password_changed: bool,
    fetch_job: Option<Job<Result<UserProfile, ClientError>>>,
    teams_job: Option<Job<Result<Vec<Team>, ClientError>>>,
    password_job: Option<Job<Result<(), ClientError>>>,
}

impl UserProfileState {
    pub fn new() -> Self {
        Self {
            user: None,
            error: None,
            teams: Vec::new(),
            current_password: String::new(),
            new_password: String::new(),
            confirm_password: String::new(),
            password_error: None,
            password_changed: false,
            fetch_job: None,
            teams_job: None,
            password_job: None,
        }
    }

    pub fn refresh(&mut self, services: &Services) {
        let api = services.api.clone();
        self.fetch_job = Some(services.spawn(async move { api.my_page().await }));
        let api = services.api.clone();
        self.teams_job = Some(services.spawn(async move { api.list_teams().await }));
    }

    pub fn apply_profile_result(&mut self, result: Result<UserProfile, ClientError>) {
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.error = None;
            }
            Err(ClientError::Auth { status: 401, .. }) => {
                self.error = Some("Your session is no longer valid. Please sign in again.".to_string());
            }
            Err(ClientError::Auth { .. }) => {
                self.error = Some("Could not load the profile for this account.".to_string());
            }
            Err(_) => {
                self.error = Some("Something went wrong while loading your profile.".to_string());
            }
        }
    }

    /// Local checks before the password-change call: every field present,
    /// confirmation matching, minimum length 8.
    fn validate_password_change(&mut self) -> Option<PasswordChangeRequest> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            self.password_error = Some("Please fill in every field.".to_string());
            return None;
        }
        if self.new_password != self.confirm_password {
            self.password_error = Some("The new passwords do not match.".to_string());
            return None;
        }
        if self.new_password.chars().count() < 8 {
            self.password_error =
                Some("The new password must be at least 8 characters.".to_string());
            return None;
        }
        Some(PasswordChangeRequest {
            old_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }

    pub fn submit_password_change(&mut self, services: &Services) {
        self.password_changed = false;
        let Some(request) = self.validate_password_change() else {
            return;
        };
        self.password_error = None;
        let api = services.api.clone();
        self.password_job =
            Some(services.spawn(async move { api.change_password(&request).await }));
    }

    pub fn apply_password_result(&mut self, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                self.password_error = None;
                self.password_changed = true;
                self.current_password.clear();
                self.new_password.clear();
                self.confirm_password.clear();
            }
            Err(ClientError::Auth { .. }) => {
                self.password_error = Some("Your session is no longer valid.".to_string());
            }
            Err(ClientError::Network { .. }) => {
                self.password_error = Some("A network error occurred. Try again.".to_string());
            }
            Err(_) => {
                self.password_error =
                    Some("Could not change the password. Try again.".to_string());
            }
        }
    }

    pub fn poll(&mut self) {
        if let Some(result) = poll_slot(&mut self.fetch_job) {
            self.apply_profile_result(result);
        }
        if let Some(result) = poll_slot(&mut self.teams_job) {
            // The team list is secondary; its failure leaves the inline
            // profile error to the profile fetch.
            if let Ok(teams) = result {
                self.teams = teams;
            }
        }
        if let Some(result) = poll_slot(&mut self.password_job) {
            self.apply_password_result(result);
        }
    }
}

impl Default for UserProfileState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-team participant profile: nickname and avatar, plus team departure.
pub struct TeamProfileState {
    pub participants: Vec<TeamParticipant>,
    pub selected: Option<TeamParticipant>,
    pub nickname: String,
    pub avatar_path: String,
    pub avatar: Option<AvatarUpload>,
    list_job: Option<Job<Result<Vec<TeamParticipant>, ClientError>>>,
    select_job: Option<Job<Result<Option<TeamParticipant>, ClientError>>>,
    update_job: Option<Job<Result<Vec<TeamParticipant>, ClientError>>>,
    leave_job: Option<Job<Result<Vec<TeamParticipant>, ClientError>>>,
}

impl TeamProfileState {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            selected: None,
            nickname: String::new(),
            avatar_path: String::new(),
            avatar: None,
            list_job: None,
            select_job: None,
            update_job: None,
            leave_job: None,
        }
    }

    pub fn refresh(&mut self, services: &Services) {
        let api = services.api.clone();
        self.list_job = Some(services.spawn(async move { api.my_participants().await }));
    }

    pub fn apply_participants(
        &mut self,
        result: Result<Vec<TeamParticipant>, ClientError>,
        feedback: &mut Feedback,
    ) {
        match result {
            Ok(participants) => {
                // Keep the selection pointing at the fresh record.
                if let Some(selected) = &self.selected {
                    let id = selected.team_participants_id;
                    self.selected = participants
                        .iter()
                        .find(|p| p.team_participants_id == id)
                        .cloned();
                    if let Some(fresh) = &self.selected {
                        self.nickname = fresh.team_nick_name.clone();
                    }
                }
                self.participants = participants;
            }
            Err(error) => feedback.error(&error),
        }
    }

    /// Pick a team: load its membership record into the editor fields
    pub fn select(&mut self, team_participants_id: i64) {
        self.selected = self
            .participants
            .iter()
            .find(|p| p.team_participants_id == team_participants_id)
            .cloned();
        if let Some(selected) = &self.selected {
            self.nickname = selected.team_nick_name.clone();
        }
        self.avatar = None;
        self.avatar_path.clear();
    }

    /// Authoritative re-fetch of the selected team's membership record
    pub fn refresh_selected(&mut self, services: &Services) {
        let Some(team_id) = self.selected.as_ref().and_then(|p| p.team_id) else {
            return;
        };
        let api = services.api.clone();
        self.select_job =
            Some(services.spawn(async move { api.participant_for_team(team_id).await }));
    }

    /// Read the avatar image from the local path into upload bytes
    pub fn load_avatar(&mut self, feedback: &mut Feedback) {
        let path = self.avatar_path.trim().to_string();
        if path.is_empty() {
            return;
        }
        match std::fs::read(&path) {
            Ok(bytes) => {
                let file_name = Path::new(&path)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "avatar".to_string());
                self.avatar = Some(AvatarUpload { file_name, bytes });
            }
            Err(error) => feedback.error(&ClientError::validation(
                "participantImg",
                format!("Could not read the image: {}", error),
            )),
        }
    }

    /// Submit nickname/avatar; success re-fetches the membership list.
    pub fn submit_update(&mut self, services: &Services, feedback: &mut Feedback) {
        let Some(selected) = &self.selected else {
            return;
        };
        let nickname = self.nickname.trim().to_string();
        if nickname.is_empty() {
            feedback.error(&ClientError::validation(
                "teamNickName",
                "Nickname is required.",
            ));
            return;
        }
        let update = ParticipantProfileUpdate {
            team_participants_id: selected.team_participants_id,
            team_nick_name: nickname,
            avatar: self.avatar.take(),
        };
        let api = services.api.clone();
        self.update_job = Some(services.spawn(async move {
            api.update_participant_profile(update).await?;
            api.my_participants().await
        }));
    }

    /// Guard for team departure: a leader must hand leadership over first.
    pub fn can_leave(&self) -> Result<i64, ClientError> {
        let selected = self
            .selected
            .as_ref()
            .ok_or_else(|| ClientError::validation("team", "Pick a team first."))?;
        if selected.is_leader() {
            return Err(ClientError::validation(
                "teamRole",
                "Hand over team leadership before leaving the team.",
            ));
        }
        selected
            .team_id
            .ok_or_else(|| ClientError::validation("team", "This membership has no team id."))
    }

    pub fn request_leave(&mut self, services: &Services, feedback: &mut Feedback) {
        let team_id = match self.can_leave() {
            Ok(team_id) => team_id,
            Err(error) => {
                feedback.error(&error);
                return;
            }
        };
        let api = services.api.clone();
        self.leave_job = Some(services.spawn(async move {
            api.leave_team(team_id).await?;
            api.my_participants().await
        }));
    }

    pub fn poll(&mut self, feedback: &mut Feedback) {
        if let Some(result) = poll_slot(&mut self.list_job) {
            self.apply_participants(result, feedback);
        }
        if let Some(result) = poll_slot(&mut self.select_job) {
            match result {
                Ok(Some(participant)) => {
                    self.nickname = participant.team_nick_name.clone();
                    self.selected = Some(participant);
                }
                Ok(None) => {}
                Err(error) => feedback.error(&error),
            }
        }
        if let Some(result) = poll_slot(&mut self.update_job) {
            let succeeded = result.is_ok();
            self.apply_participants(result, feedback);
            if succeeded {
                feedback.info("Profile updated.");
            }
        }
        if let Some(result) = poll_slot(&mut self.leave_job) {
            if result.is_ok() {
                self.selected = None;
                self.nickname.clear();
            }
            let succeeded = result.is_ok();
            self.apply_participants(result, feedback);
            if succeeded {
                feedback.info("You have left the team.");
            }
        }
    }
}

impl Default for TeamProfileState {
    fn default() -> Self {
        Self::new()
    }
}
