//! Centralized error reporting for the UI layer.
//!
//! # Responsibility
//! - Classify repository failures into user-facing error categories.
//! - Hold the last reported error and a visibility flag for the display
//!   layer (last-write-wins, no queueing).
//!
//! # Invariants
//! - The reporter is injected by reference wherever failures are surfaced;
//!   there is no process-wide singleton.
//! - Reporting never panics and never aborts; every failure is recoverable
//!   from the caller's point of view.

use crate::repo::RepoError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing error categories for the application.
#[derive(Debug)]
pub enum AppError {
    SaveFailed(RepoError),
    DeleteFailed(RepoError),
    FetchFailed(RepoError),
    ValidationFailed(Vec<String>),
    Unknown(String),
}

impl AppError {
    /// Classifies a failure from a save/create/update call site.
    ///
    /// Validation failures keep their reasons instead of collapsing into
    /// the generic save message.
    pub fn save_failed(err: RepoError) -> Self {
        match err {
            RepoError::Validation(reasons) => Self::ValidationFailed(reasons),
            other => Self::SaveFailed(other),
        }
    }

    /// Classifies a failure from a delete call site.
    pub fn delete_failed(err: RepoError) -> Self {
        Self::DeleteFailed(err)
    }

    /// Classifies a failure from a fetch call site.
    pub fn fetch_failed(err: RepoError) -> Self {
        Self::FetchFailed(err)
    }

    /// Short user-facing description of what went wrong.
    pub fn message(&self) -> String {
        match self {
            Self::SaveFailed(_) => "Failed to save changes".to_string(),
            Self::DeleteFailed(_) => "Failed to delete item".to_string(),
            Self::FetchFailed(_) => "Failed to load data".to_string(),
            Self::ValidationFailed(reasons) => reasons.join("\n"),
            Self::Unknown(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Hint shown alongside the message telling the user how to recover.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::SaveFailed(_) | Self::DeleteFailed(_) => {
                "Please try again. If the problem persists, restart the app."
            }
            Self::FetchFailed(_) => "Pull to refresh or restart the app.",
            Self::ValidationFailed(_) => "Please correct the highlighted fields.",
            Self::Unknown(_) => "Please restart the app and try again.",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::SaveFailed(_) => "save_failed",
            Self::DeleteFailed(_) => "delete_failed",
            Self::FetchFailed(_) => "fetch_failed",
            Self::ValidationFailed(_) => "validation_failed",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SaveFailed(err) | Self::DeleteFailed(err) | Self::FetchFailed(err) => Some(err),
            Self::ValidationFailed(_) | Self::Unknown(_) => None,
        }
    }
}

/// Sink for failures surfaced by the UI layer.
///
/// Injected by reference into whichever component needs to report; keeps
/// error state out of global scope and easy to fake in tests.
pub trait ErrorReporter {
    fn report(&mut self, error: AppError, context: &str);
}

/// Reporter holding only the most recent error.
///
/// Matches the display model of a single alert surface: a new error
/// overwrites the previous one, and dismissing the alert clears state.
#[derive(Debug, Default)]
pub struct LastErrorReporter {
    current: Option<AppError>,
    visible: bool,
}

impl LastErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The error currently awaiting display, if any.
    pub fn current_error(&self) -> Option<&AppError> {
        self.current.as_ref()
    }

    /// Whether the display layer should be showing an alert.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Clears the current error state.
    pub fn clear(&mut self) {
        self.current = None;
        self.visible = false;
    }
}

impl ErrorReporter for LastErrorReporter {
    fn report(&mut self, error: AppError, context: &str) {
        error!(
            "event=app_error module=report status=error context={} code={} detail={}",
            if context.is_empty() { "-" } else { context },
            error.code(),
            single_line(&error)
        );
        self.current = Some(error);
        self.visible = true;
    }
}

fn single_line(error: &AppError) -> String {
    let detail = match error {
        AppError::ValidationFailed(reasons) => reasons.join("; "),
        AppError::Unknown(details) => details.clone(),
        AppError::SaveFailed(err) | AppError::DeleteFailed(err) | AppError::FetchFailed(err) => {
            err.to_string()
        }
    };
    detail.replace(['\n', '\r'], " ")
}
