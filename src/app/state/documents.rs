//! Document List State
//!
//! One fetch per team view; search and pagination are client-side over the
//! fetched set only. Typing a search term or flipping pages never issues a
//! new fetch.

use crate::app::api::ApiClient;
use crate::app::feedback::Feedback;
use crate::app::jobs::{poll_slot, Job, Services};
use crate::shared::models::{CreateDocumentRequest, Document};
use crate::shared::ClientError;

/// Documents shown per page
pub const PAGE_SIZE: usize = 10;

/// Inputs of the create-document form
#[derive(Debug, Clone, Default)]
pub struct DocumentForm {
    pub title: String,
    pub content: String,
}

async fn create_and_refresh(
    api: ApiClient,
    team_id: i64,
    request: CreateDocumentRequest,
) -> Result<Vec<Document>, ClientError> {
    api.create_document(team_id, &request).await?;
    api.list_documents(team_id).await
}

/// Document list state for one team
pub struct DocumentListState {
    pub team_id: i64,
    documents: Vec<Document>,
    pub search_term: String,
    pub page: usize,
    pub create_form: Option<DocumentForm>,
    list_job: Option<Job<Result<Vec<Document>, ClientError>>>,
    create_job: Option<Job<Result<Vec<Document>, ClientError>>>,
}

impl DocumentListState {
    pub fn new(team_id: i64) -> Self {
        Self {
            team_id,
            documents: Vec::new(),
            search_term: String::new(),
            page: 0,
            create_form: None,
            list_job: None,
            create_job: None,
        }
    }

    /// Fetch the team's documents
    pub fn refresh(&mut self, services: &Services) {
        let api = services.api.clone();
        let team_id = self.team_id;
        self.list_job = Some(services.spawn(async move { api.list_documents(team_id).await }));
    }

    /// The whole fetched set
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Fetched documents matching the search term. The scope is the fetched
    /// set, never the full corpus.
    pub fn filtered(&self) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|document| document.matches(&self.search_term))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE)
    }

    /// The filtered slice for the current page
    pub fn visible(&self) -> Vec<&Document> {
        self.filtered()
            .into_iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    /// Update the search term; resets to the first page.
    pub fn set_search_term(&mut self, term: String) {
        if term != self.search_term {
            self.search_term = term;
            self.page = 0;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        let last = self.page_count().saturating_sub(1);
        self.page = page.min(last);
    }

    pub fn open_create_form(&mut self) {
        self.create_form = Some(DocumentForm::default());
    }

    pub fn close_create_form(&mut self) {
        self.create_form = None;
    }

    /// Local validation of the create form; no network call on failure.
    fn validate_create(&self) -> Option<Result<CreateDocumentRequest, ClientError>> {
        let form = self.create_form.as_ref()?;
        if form.title.trim().is_empty() {
            return Some(Err(ClientError::validation(
                "title",
                "The document needs a title.",
            )));
        }
        Some(Ok(CreateDocumentRequest {
            title: form.title.trim().to_string(),
            content: form.content.clone(),
        }))
    }

    /// Submit the create form; an empty title aborts locally.
    pub fn submit_create(&mut self, services: &Services, feedback: &mut Feedback) {
        let request = match self.validate_create() {
            None => return,
            Some(Err(error)) => {
                feedback.error(&error);
                return;
            }
            Some(Ok(request)) => request,
        };
        self.create_form = None;
        self.create_job = Some(services.spawn(create_and_refresh(
            services.api.clone(),
            self.team_id,
            request,
        )));
    }

    /// Drain finished jobs; called once per frame
    pub fn poll(&mut self, feedback: &mut Feedback) {
        if let Some(result) = poll_slot(&mut self.list_job) {
            self.apply_list_result(result, feedback);
        }
        if let Some(result) = poll_slot(&mut self.create_job) {
            self.apply_list_result(result, feedback);
        }
    }

    pub fn apply_list_result(
        &mut self,
        result: Result<Vec<Document>, ClientError>,
        feedback: &mut Feedback,
    ) {
        match result {
            Ok(documents) => {
                self.documents = documents;
                self.set_page(self.page);
            }
            // A malformed page (no `content` array) or a transport failure
            // leaves the list as it was; no retry.
            Err(error) => feedback.error(&error),
        }
    }
}
