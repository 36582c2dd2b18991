//! Schedule (calendar event) endpoints

use super::ApiClient;
use crate::shared::models::{
    CreateScheduleRequest, DeleteScheduleRequest, EditScheduleRequest, Schedule,
};
use crate::shared::ClientError;

impl ApiClient {
    /// Fetch all of a team's calendar events
    pub async fn list_schedules(&self, team_id: i64) -> Result<Vec<Schedule>, ClientError> {
        let response = self
            .authed(
                self.http()
                    .get(self.url(&format!("/team/{}/schedules/calendar", team_id))),
            )?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a simple schedule
    pub async fn create_schedule(
        &self,
        team_id: i64,
        request: &CreateScheduleRequest,
    ) -> Result<Schedule, ClientError> {
        let response = self
            .authed(
                self.http()
                    .post(self.url(&format!("/team/{}/schedules/simple", team_id))),
            )?
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Edit a simple schedule in place
    pub async fn edit_schedule(
        &self,
        team_id: i64,
        request: &EditScheduleRequest,
    ) -> Result<Schedule, ClientError> {
        let response = self
            .authed(
                self.http()
                    .put(self.url(&format!("/team/{}/schedules/simple", team_id))),
            )?
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete a simple schedule; the body repeats the ids for the backend's
    /// permission check.
    pub async fn delete_schedule(
        &self,
        team_id: i64,
        request: &DeleteScheduleRequest,
    ) -> Result<(), ClientError> {
        let response = self
            .authed(self.http().delete(self.url(&format!(
                "/team/{}/schedules/simple/{}",
                team_id, request.schedule_id
            ))))?
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
