// ABOUTME: Errors surfaced by the settings controller
// ABOUTME: Each kind is terminal for the request and carries a localized message

use autobackup_core::constants::{MSG_DATE_FORMAT_ERROR, MSG_FORM_INVALID, MSG_TIME_ERROR};
use thiserror::Error;

use crate::types::BackLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminErrorKind {
    /// Anti-forgery check failed
    InvalidSubmission,
    /// The schedule date could not be parsed
    InvalidSchedule,
    /// Backups were enabled with a schedule at or before the current time
    ScheduleNotInFuture,
}

impl AdminErrorKind {
    /// Language key of the message shown to the administrator
    pub fn message_code(&self) -> &'static str {
        match self {
            AdminErrorKind::InvalidSubmission => MSG_FORM_INVALID,
            AdminErrorKind::InvalidSchedule => MSG_DATE_FORMAT_ERROR,
            AdminErrorKind::ScheduleNotInFuture => MSG_TIME_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AdminError {
    pub kind: AdminErrorKind,
    pub message: String,
    pub back_link: BackLink,
}
