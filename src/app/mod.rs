//! Desktop Client Application
//!
//! This module provides the native desktop application (egui/eframe) that
//! talks to the collaboration backend over HTTP and to the message broker
//! over WebSocket.
//!
//! # Module Structure
//!
//! ```text
//! app/
//! ├── mod.rs       - Module exports
//! ├── main.rs      - Binary entry point
//! ├── config.rs    - Client configuration (server URL, broker URL)
//! ├── session.rs   - Explicit auth session passed into components
//! ├── feedback.rs  - Unified feedback sink (log + notices)
//! ├── jobs.rs      - Async-to-UI bridge on the shared runtime
//! ├── api/         - HTTP client gateway and endpoints
//! ├── state/       - Per-view state (the synchronization contracts)
//! ├── realtime/    - Broker framing and the document session
//! └── views/       - egui rendering
//! ```

pub mod api;
pub mod config;
pub mod feedback;
pub mod jobs;
pub mod realtime;
pub mod session;
pub mod state;
pub mod views;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use feedback::{Feedback, Notice, NoticeLevel};
pub use jobs::{Job, Services};
pub use session::Session;
pub use state::{AppState, AppView};
