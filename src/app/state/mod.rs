//! Central Application State
//!
//! One `AppState` owns the runtime, the session, and every view's state.
//! Each frame the egui loop drains finished jobs through [`AppState::poll_results`]
//! before rendering.

pub mod auth;
pub mod calendar;
pub mod categories;
pub mod documents;
pub mod profile;

pub use auth::SignInPanel;
pub use calendar::CalendarState;
pub use categories::CategoryPanel;
pub use documents::DocumentListState;
pub use profile::ProfilePane;

use crate::app::api::ApiClient;
use crate::app::config::Config;
use crate::app::feedback::Feedback;
use crate::app::jobs::{poll_slot, Job, Services};
use crate::app::realtime::DocumentSession;
use crate::app::session::Session;
use crate::shared::models::{Document, TeamParticipant, UserProfile};
use crate::shared::ClientError;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    SignIn,
    Calendar,
    Documents,
    Editor,
    Profile,
}

/// The per-team views, constructed when a team is picked
pub struct TeamWorkspace {
    pub team_id: i64,
    pub participant_id: i64,
    pub categories: CategoryPanel,
    pub calendar: CalendarState,
    pub documents: DocumentListState,
}

impl TeamWorkspace {
    /// Build the workspace for one membership record and kick off the
    /// initial fetches.
    pub fn open(services: &Services, participant: &TeamParticipant) -> Option<Self> {
        let team_id = participant.team_id?;
        let participant_id = participant.team_participants_id;
        let mut categories = CategoryPanel::new(team_id, participant_id);
        let mut calendar = CalendarState::new(
            team_id,
            participant_id,
            chrono::Local::now().date_naive(),
        );
        let mut documents = DocumentListState::new(team_id);
        categories.refresh(services);
        calendar.refresh(services);
        documents.refresh(services);
        Some(Self {
            team_id,
            participant_id,
            categories,
            calendar,
            documents,
        })
    }

    pub fn poll(&mut self, feedback: &mut Feedback) {
        self.categories.poll(feedback);
        self.calendar.poll(feedback);
        self.documents.poll(feedback);
    }
}

/// An open editor with its realtime session
pub struct EditorPane {
    pub session: DocumentSession,
}

impl EditorPane {
    pub fn open(services: &Services, document: &Document) -> Self {
        let mut session = DocumentSession::open(
            services.runtime(),
            services.config.broker_url(),
            &document.id,
        );
        // Show the listed copy until the first broadcast arrives.
        session.title = document.title.clone();
        session.buffer = document.content.clone();
        Self { session }
    }
}

/// Central application state shared across egui views.
pub struct AppState {
    runtime: tokio::runtime::Runtime,
    pub config: Config,
    pub session: Session,
    pub services: Services,
    pub feedback: Feedback,
    pub view: AppView,
    pub sign_in: SignInPanel,
    /// The user's membership records, driving the team picker
    pub participants: Vec<TeamParticipant>,
    participants_job: Option<Job<Result<Vec<TeamParticipant>, ClientError>>>,
    pub workspace: Option<TeamWorkspace>,
    pub editor: Option<EditorPane>,
    pub profile: ProfilePane,
}

impl AppState {
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("tokio runtime builds");
        let config = Config::new();
        let session = Session::new();
        let services = Services::new(
            ApiClient::new(config.clone(), session.clone()),
            config.clone(),
            runtime.handle().clone(),
        );
        Self {
            runtime,
            config,
            session,
            services,
            feedback: Feedback::new(),
            view: AppView::SignIn,
            sign_in: SignInPanel::new(),
            participants: Vec::new(),
            participants_job: None,
            workspace: None,
            editor: None,
            profile: ProfilePane::new(),
        }
    }

    /// Drain every pending job; called once per frame before rendering.
    pub fn poll_results(&mut self) {
        if let Some((token, user)) = self.sign_in.poll() {
            self.complete_sign_in(token, user);
        }
        if let Some(result) = poll_slot(&mut self.participants_job) {
            match result {
                Ok(participants) => self.participants = participants,
                Err(error) => self.feedback.error(&error),
            }
        }
        if let Some(workspace) = &mut self.workspace {
            workspace.poll(&mut self.feedback);
        }
        if let Some(editor) = &mut self.editor {
            editor.session.poll(&mut self.feedback);
        }
        self.profile.poll(&mut self.feedback);
    }

    /// Swap in the authenticated session and rebuild the services every
    /// component receives from now on.
    fn complete_sign_in(&mut self, token: String, user: UserProfile) {
        tracing::info!(email = %user.email, "Signed in");
        self.session = Session::authenticated(token, user);
        self.services = Services::new(
            ApiClient::new(self.config.clone(), self.session.clone()),
            self.config.clone(),
            self.runtime.handle().clone(),
        );
        self.view = AppView::Calendar;
        self.load_participants();
        self.profile.refresh(&self.services);
    }

    fn load_participants(&mut self) {
        let api = self.services.api.clone();
        self.participants_job = Some(
            self.services
                .spawn(async move { api.my_participants().await }),
        );
    }

    /// Team picker: build the workspace for the chosen membership record.
    pub fn select_team(&mut self, team_participants_id: i64) {
        let Some(participant) = self
            .participants
            .iter()
            .find(|p| p.team_participants_id == team_participants_id)
            .cloned()
        else {
            return;
        };
        match TeamWorkspace::open(&self.services, &participant) {
            Some(workspace) => {
                self.workspace = Some(workspace);
                self.editor = None;
                if self.view == AppView::Editor {
                    self.view = AppView::Calendar;
                }
            }
            None => self.feedback.error(&ClientError::validation(
                "team",
                "This membership record has no team id.",
            )),
        }
    }

    /// Open a document in the editor with its realtime session.
    pub fn open_editor(&mut self, document: &Document) {
        self.editor = Some(EditorPane::open(&self.services, document));
        self.view = AppView::Editor;
    }

    /// Close the editor; dropping the pane deactivates the session.
    pub fn close_editor(&mut self) {
        self.editor = None;
        self.view = AppView::Documents;
    }

    pub fn sign_out(&mut self) {
        self.session.clear();
        self.services = Services::new(
            ApiClient::new(self.config.clone(), self.session.clone()),
            self.config.clone(),
            self.runtime.handle().clone(),
        );
        self.sign_in = SignInPanel::new();
        self.participants.clear();
        self.participants_job = None;
        self.workspace = None;
        self.editor = None;
        self.profile = ProfilePane::new();
        self.view = AppView::SignIn;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
