//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{AppView, ClientError, DraftError, ErrorKind, Operation};

pub enum UiEvent {
    Rendered(AppView),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadData,
    CreateParty,
    General,
}

impl From<Operation> for UiErrorContext {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::ListParties
            | Operation::GetParty
            | Operation::ListRsvps
            | Operation::ListGuests => UiErrorContext::LoadData,
            Operation::CreateParty => UiErrorContext::CreateParty,
            Operation::RemoveParty => UiErrorContext::General,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl From<ErrorKind> for UiErrorCategory {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Config => UiErrorCategory::Validation,
            ErrorKind::Transport => UiErrorCategory::Transport,
            ErrorKind::Server => UiErrorCategory::Server,
            ErrorKind::Internal => UiErrorCategory::Unknown,
        }
    }
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_client(context: UiErrorContext, err: &ClientError) -> Self {
        Self::new(err.kind().into(), context, err.to_string())
    }

    pub fn from_draft(err: &DraftError) -> Self {
        Self::new(
            UiErrorCategory::Validation,
            UiErrorContext::CreateParty,
            err.to_string(),
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

/// Status-line text for a failure.
pub fn describe_error(err: &UiError) -> String {
    let prefix = match err.context() {
        UiErrorContext::BackendStartup => "Backend worker startup failure",
        UiErrorContext::LoadData => "Could not refresh parties",
        UiErrorContext::CreateParty => "Could not add party",
        UiErrorContext::General => "Request failed",
    };
    format!(
        "{prefix} ({} error): {}",
        err_label(err.category()),
        err.message()
    )
}
