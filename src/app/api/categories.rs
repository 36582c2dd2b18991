//! Category endpoints
//!
//! All mutations carry JSON bodies; the delete body holds the reassignment
//! intent for events still assigned to the category.

use super::ApiClient;
use crate::shared::models::{
    Category, CreateCategoryRequest, DeleteCategoryRequest, EditCategoryRequest, Page,
};
use crate::shared::ClientError;

impl ApiClient {
    /// List a team's schedule categories
    pub async fn list_categories(&self, team_id: i64) -> Result<Vec<Category>, ClientError> {
        let response = self
            .authed(self.http().get(self.url("/category")))?
            .query(&[
                ("teamId", team_id.to_string()),
                ("categoryType", "SCHEDULE".to_string()),
            ])
            .send()
            .await?;
        let page: Page<Category> = Self::check(response).await?.json().await?;
        Ok(page.content)
    }

    /// Create a category, returning the server's representation
    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<Category, ClientError> {
        let response = self
            .authed(self.http().post(self.url("/category")))?
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Edit a category, returning the server's representation
    pub async fn edit_category(
        &self,
        request: &EditCategoryRequest,
    ) -> Result<Category, ClientError> {
        let response = self
            .authed(self.http().put(self.url("/category")))?
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete a category. The body carries whether assigned events cascade
    /// or move to `new_category_id`.
    pub async fn delete_category(
        &self,
        request: &DeleteCategoryRequest,
    ) -> Result<(), ClientError> {
        let response = self
            .authed(self.http().delete(self.url("/category")))?
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
