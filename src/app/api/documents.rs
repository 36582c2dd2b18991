//! Document endpoints

use super::ApiClient;
use crate::shared::models::{CreateDocumentRequest, Document, Page};
use crate::shared::ClientError;

impl ApiClient {
    /// Fetch one page's worth of a team's documents. The endpoint wraps the
    /// list in a page object; a response without a `content` array is a
    /// decode error, not an empty list.
    pub async fn list_documents(&self, team_id: i64) -> Result<Vec<Document>, ClientError> {
        let response = self
            .authed(
                self.http()
                    .get(self.url(&format!("/team/{}/documents", team_id))),
            )?
            .send()
            .await?;
        let page: Page<Document> = Self::check(response).await?.json().await?;
        Ok(page.content)
    }

    /// Create a document in the team
    pub async fn create_document(
        &self,
        team_id: i64,
        request: &CreateDocumentRequest,
    ) -> Result<(), ClientError> {
        let response = self
            .authed(
                self.http()
                    .post(self.url(&format!("/team/{}/documents", team_id))),
            )?
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
