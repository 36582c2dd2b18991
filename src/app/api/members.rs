//! Member, profile and team membership endpoints

use super::ApiClient;
use crate::shared::models::{
    Page, PasswordChangeRequest, SignInRequest, Team, TeamParticipant, UserProfile,
};
use crate::shared::ClientError;
use reqwest::multipart;

/// Multipart payload for `POST /member/participant`: nickname plus an
/// optional replacement avatar image read from a local file.
#[derive(Debug, Clone)]
pub struct ParticipantProfileUpdate {
    pub team_participants_id: i64,
    pub team_nick_name: String,
    pub avatar: Option<AvatarUpload>,
}

/// Raw image bytes for the avatar part
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    /// Sign in. The backend returns the access token in the
    /// `Authorization: Bearer ...` response header, not the body.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<String, ClientError> {
        let response = self
            .http()
            .post(self.url("/sign-in"))
            .json(request)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let header = response
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ClientError::decode("sign-in response carried no token"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ClientError::decode("malformed Authorization header"))?;
        Ok(token.to_string())
    }

    /// Fetch the signed-in user's profile
    pub async fn my_page(&self) -> Result<UserProfile, ClientError> {
        let response = self
            .authed(self.http().get(self.url("/my-page")))?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// List the user's team membership records
    pub async fn my_participants(&self) -> Result<Vec<TeamParticipant>, ClientError> {
        let response = self
            .authed(self.http().get(self.url("/member/participants")))?
            .send()
            .await?;
        let page: Page<TeamParticipant> = Self::check(response).await?.json().await?;
        Ok(page.content)
    }

    /// The user's membership record for one team, if any
    pub async fn participant_for_team(
        &self,
        team_id: i64,
    ) -> Result<Option<TeamParticipant>, ClientError> {
        let response = self
            .authed(self.http().get(self.url("/member/participants")))?
            .query(&[("teamId", team_id.to_string())])
            .send()
            .await?;
        let page: Page<TeamParticipant> = Self::check(response).await?.json().await?;
        Ok(page.content.into_iter().next())
    }

    /// Update nickname and optionally the avatar for one membership record.
    /// The avatar travels as multipart form data; everything else in the
    /// API is JSON.
    pub async fn update_participant_profile(
        &self,
        update: ParticipantProfileUpdate,
    ) -> Result<TeamParticipant, ClientError> {
        let mut form = multipart::Form::new()
            .text(
                "teamParticipantsId",
                update.team_participants_id.to_string(),
            )
            .text("teamNickName", update.team_nick_name);
        if let Some(avatar) = update.avatar {
            let part = multipart::Part::bytes(avatar.bytes).file_name(avatar.file_name);
            form = form.part("participantImg", part);
        }
        let response = self
            .authed(self.http().post(self.url("/member/participant")))?
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Change the account password
    pub async fn change_password(
        &self,
        request: &PasswordChangeRequest,
    ) -> Result<(), ClientError> {
        let response = self
            .authed(self.http().post(self.url("/member/password")))?
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Leave a team
    pub async fn leave_team(&self, team_id: i64) -> Result<(), ClientError> {
        let response = self
            .authed(
                self.http()
                    .delete(self.url(&format!("/team/{}/participant", team_id))),
            )?
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// List the user's teams
    pub async fn list_teams(&self) -> Result<Vec<Team>, ClientError> {
        let response = self
            .authed(self.http().get(self.url("/team/list")))?
            .query(&[("page", "0"), ("size", "10"), ("sort", "createDt,asc")])
            .send()
            .await?;
        let page: Page<Team> = Self::check(response).await?.json().await?;
        Ok(page.content)
    }
}
