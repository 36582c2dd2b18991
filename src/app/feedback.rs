//! Unified Feedback Sink
//!
//! Every failure in the client flows through this one sink: it logs via
//! `tracing` and queues a user-visible notice. Components never swallow
//! errors silently and never invent their own surfacing mechanism, so
//! failure behavior is uniform across views.

use crate::shared::ClientError;
use std::collections::VecDeque;

/// Maximum notices kept; older ones are dropped first.
const NOTICE_CAPACITY: usize = 8;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One user-visible notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Bounded queue of notices plus the log side of error reporting.
#[derive(Debug, Default)]
pub struct Feedback {
    notices: VecDeque<Notice>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a success or status message
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.push(Notice {
            level: NoticeLevel::Info,
            message,
        });
    }

    /// Report a failure with the taxonomy-driven default message
    pub fn error(&mut self, error: &ClientError) {
        tracing::error!(error = %error, "Operation failed");
        self.push(Notice {
            level: NoticeLevel::Error,
            message: user_message(error),
        });
    }

    /// Report a failure with a fixed, flow-specific message. The underlying
    /// error still goes to the log.
    pub fn error_with_message(&mut self, error: &ClientError, message: impl Into<String>) {
        tracing::error!(error = %error, "Operation failed");
        self.push(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }

    fn push(&mut self, notice: Notice) {
        if self.notices.len() == NOTICE_CAPACITY {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

/// Map the error taxonomy to consistent user-facing wording.
fn user_message(error: &ClientError) -> String {
    match error {
        ClientError::Network { .. } => {
            "Network error - check your connection and try again.".to_string()
        }
        ClientError::Auth { .. } => {
            "You don't have permission for that, or your session has expired.".to_string()
        }
        ClientError::Validation { message, .. } => message.clone(),
        ClientError::Domain { message, .. } => message.clone(),
        ClientError::Decode { .. } => "The server returned an unexpected response.".to_string(),
    }
}
