//! Team and Team Participant Data Structures
//!
//! A team participant is a user's membership record within one team,
//! distinct from their global user profile.

use serde::{Deserialize, Serialize};

/// Role of a participant within a team. The leader role gates destructive
/// actions; a sole leader cannot remove themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    Leader,
    Member,
}

/// A team the user belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    #[serde(default)]
    pub profile_url: Option<String>,
}

/// One (user, team) membership record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamParticipant {
    pub team_participants_id: i64,
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_nick_name: String,
    #[serde(default)]
    pub participants_profile_url: Option<String>,
    pub team_role: TeamRole,
}

impl TeamParticipant {
    pub fn is_leader(&self) -> bool {
        self.team_role == TeamRole::Leader
    }

    /// Label for team pickers: the team name when known, else the nickname
    pub fn team_label(&self) -> &str {
        self.team_name.as_deref().unwrap_or(&self.team_nick_name)
    }
}
