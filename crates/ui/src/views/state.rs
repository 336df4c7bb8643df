use dioxus::prelude::*;

use services::{RecordingServiceError, SyncServiceError, VoiceServiceError};

/// A failure scoped to one view or control, carrying the message the
/// server (or transport) produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    message: String,
}

impl ViewError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SyncServiceError> for ViewError {
    fn from(err: SyncServiceError) -> Self {
        Self::new(err.message())
    }
}

impl From<VoiceServiceError> for ViewError {
    fn from(err: VoiceServiceError) -> Self {
        Self::new(err.message())
    }
}

impl From<RecordingServiceError> for ViewError {
    fn from(err: RecordingServiceError) -> Self {
        Self::new(err.message())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::new("Something went wrong")),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
