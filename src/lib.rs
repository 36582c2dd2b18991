//! Teamspace - Native Team Collaboration Client
//!
//! Teamspace is a native desktop client for a team-collaboration service:
//! team calendars with schedule categories, shared document lists, a
//! collaborative text editor with realtime sync, and user/team profile
//! management.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared across the client
//!   - Wire models (categories, schedules, documents, teams, members)
//!   - Configuration
//!   - The error taxonomy
//!
//! - **`app`** - The desktop application (egui/eframe)
//!   - HTTP client gateway and per-feature API endpoints
//!   - Per-view state (the testable synchronization contracts)
//!   - Realtime document session over the message broker
//!   - egui views
//!
//! # Architecture
//!
//! Every view component owns its local state and talks to the backend
//! through the HTTP client gateway. Mutations follow one contract: on
//! success the affected list is re-fetched (or replaced with the server's
//! returned representation); on failure the prior state is left untouched
//! and the error is routed through the single feedback sink.
//!
//! The only persistent connection is the realtime document session, which
//! holds one broker connection per open editor.

/// Shared types and data structures
pub mod shared;

/// Desktop client application
pub mod app;
