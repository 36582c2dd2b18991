//! Realtime Document Sync
//!
//! The broker speaks a STOMP-style frame protocol over WebSocket. This
//! module holds the frame codec and the per-document session that owns one
//! broker connection while an editor is open.

pub mod session;
pub mod stomp;

pub use session::{DocumentBroadcast, DocumentSession, SessionState};
pub use stomp::{Command, Frame, FrameError};
