//! Category Manager State
//!
//! Owns the category list for one team plus the add/edit form and the
//! delete dialog. Every mutation follows the sync-after-mutate contract:
//! on success the list is re-fetched from the server (never locally
//! spliced); on failure the list keeps its previous contents and exactly
//! one notice is reported.

use crate::app::api::ApiClient;
use crate::app::feedback::Feedback;
use crate::app::jobs::{poll_slot, Job, Services};
use crate::shared::models::{
    Category, CategoryType, CreateCategoryRequest, DeleteCategoryRequest, EditCategoryRequest,
};
use crate::shared::ClientError;

/// Fixed message when the server refuses a category delete.
const DELETE_REFUSED_MESSAGE: &str =
    "The category was created by another team member and can't be deleted with your role.";

/// Which mutation a pending job belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationKind {
    Create,
    Edit,
    Delete,
}

/// Delete then re-fetch: the list shown after a successful delete is the
/// server's, never a local splice.
pub async fn delete_and_refresh(
    api: ApiClient,
    request: DeleteCategoryRequest,
) -> Result<Vec<Category>, ClientError> {
    let team_id = request.team_id;
    api.delete_category(&request).await?;
    api.list_categories(team_id).await
}

/// Create then re-fetch
pub async fn create_and_refresh(
    api: ApiClient,
    request: CreateCategoryRequest,
) -> Result<Vec<Category>, ClientError> {
    let team_id = request.team_id;
    api.create_category(&request).await?;
    api.list_categories(team_id).await
}

/// Edit then re-fetch
pub async fn edit_and_refresh(
    api: ApiClient,
    request: EditCategoryRequest,
) -> Result<Vec<Category>, ClientError> {
    let team_id = request.team_id;
    api.edit_category(&request).await?;
    api.list_categories(team_id).await
}

/// Inputs of the add/edit form
#[derive(Debug, Clone)]
pub struct CategoryForm {
    /// `Some` when editing an existing category
    pub editing_category_id: Option<i64>,
    pub category_name: String,
    pub category_type: CategoryType,
    pub color: String,
}

impl CategoryForm {
    fn create() -> Self {
        Self {
            editing_category_id: None,
            category_name: String::new(),
            category_type: CategoryType::Schedule,
            color: String::new(),
        }
    }

    fn edit(category: &Category) -> Self {
        Self {
            editing_category_id: Some(category.category_id),
            category_name: category.category_name.clone(),
            category_type: category.category_type,
            color: category.color_or_default().to_string(),
        }
    }
}

/// Inputs of the delete dialog: cascade or move assigned events
#[derive(Debug, Clone)]
pub struct DeleteDialog {
    pub category_id: i64,
    pub is_moved: bool,
    pub new_category_id: Option<i64>,
}

/// Category panel state for one team
pub struct CategoryPanel {
    pub team_id: i64,
    pub participant_id: i64,
    pub categories: Vec<Category>,
    pub form: Option<CategoryForm>,
    pub delete_dialog: Option<DeleteDialog>,
    /// Set when submission was rejected for an empty name; the view focuses
    /// the name input and clears the flag.
    pub focus_name_input: bool,
    list_job: Option<Job<Result<Vec<Category>, ClientError>>>,
    mutation: Option<(MutationKind, Job<Result<Vec<Category>, ClientError>>)>,
}

impl CategoryPanel {
    pub fn new(team_id: i64, participant_id: i64) -> Self {
        Self {
            team_id,
            participant_id,
            categories: Vec::new(),
            form: None,
            delete_dialog: None,
            focus_name_input: false,
            list_job: None,
            mutation: None,
        }
    }

    /// Re-fetch the category list
    pub fn refresh(&mut self, services: &Services) {
        let api = services.api.clone();
        let team_id = self.team_id;
        self.list_job = Some(services.spawn(async move { api.list_categories(team_id).await }));
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(CategoryForm::create());
    }

    pub fn open_edit_form(&mut self, category: &Category) {
        self.form = Some(CategoryForm::edit(category));
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.focus_name_input = false;
    }

    pub fn open_delete_dialog(&mut self, category_id: i64) {
        self.delete_dialog = Some(DeleteDialog {
            category_id,
            is_moved: false,
            new_category_id: None,
        });
    }

    pub fn close_delete_dialog(&mut self) {
        self.delete_dialog = None;
    }

    /// Empty-name guard: a blank name aborts submission locally, flags the
    /// name input for focus, and issues no network call.
    fn validated_name(&mut self) -> Option<String> {
        let name = self.form.as_ref()?.category_name.trim().to_string();
        if name.is_empty() {
            self.focus_name_input = true;
            return None;
        }
        Some(name)
    }

    /// Submit the add/edit form
    pub fn submit_form(&mut self, services: &Services) {
        let Some(category_name) = self.validated_name() else {
            return;
        };
        let Some(form) = self.form.take() else {
            return;
        };
        self.focus_name_input = false;
        let api = services.api.clone();
        match form.editing_category_id {
            Some(category_id) => {
                let request = EditCategoryRequest {
                    category_id,
                    team_id: self.team_id,
                    update_participant_id: self.participant_id,
                    category_name,
                    category_type: form.category_type,
                    color: form.color,
                };
                self.mutation = Some((
                    MutationKind::Edit,
                    services.spawn(edit_and_refresh(api, request)),
                ));
            }
            None => {
                let request = CreateCategoryRequest {
                    team_id: self.team_id,
                    create_participant_id: self.participant_id,
                    category_name,
                    category_type: form.category_type,
                    color: form.color,
                };
                self.mutation = Some((
                    MutationKind::Create,
                    services.spawn(create_and_refresh(api, request)),
                ));
            }
        }
    }

    /// Submit the delete dialog
    pub fn submit_delete(&mut self, services: &Services) {
        let Some(dialog) = self.delete_dialog.take() else {
            return;
        };
        let request = DeleteCategoryRequest {
            category_id: dialog.category_id,
            team_id: self.team_id,
            participant_id: self.participant_id,
            is_moved: dialog.is_moved,
            new_category_id: if dialog.is_moved {
                dialog.new_category_id
            } else {
                None
            },
        };
        self.mutation = Some((
            MutationKind::Delete,
            services.spawn(delete_and_refresh(services.api.clone(), request)),
        ));
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
        result: Result<Vec<Category>, ClientError>,
        feedback: &mut Feedback,
    ) {
        match result {
            Ok(categories) => self.categories = categories,
            // Prior list stays untouched.
            Err(error) => feedback.error(&error),
        }
    }

    fn apply_mutation_result(
        &mut self,
        kind: MutationKind,
        result: Result<Vec<Category>, ClientError>,
        feedback: &mut Feedback,
    ) {
        match result {
            Ok(categories) => self.categories = categories,
            Err(error) => {
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
        result: Result<Vec<Category>, ClientError>,
        feedback: &mut Feedback,
    ) {
        self.apply_mutation_result(MutationKind::Delete, result, feedback);
    }
}
