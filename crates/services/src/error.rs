//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors from talking to the practice server, following the client's
/// three-bucket taxonomy: transport failure, non-2xx status, and
/// application-level rejection (`{"success": false}`).
///
/// Nothing here is retried automatically and nothing is fatal to the
/// app; each failure stays scoped to the control that triggered it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the body's JSON `error` field
    /// when present, else the raw body text, else `HTTP error {status}`.
    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The server answered 2xx but reported `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// The message to surface to the user for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ApiError::Transport(err) => format!("Network error: {err}"),
            ApiError::Status { message, .. } | ApiError::Rejected(message) => message.clone(),
        }
    }
}

/// Errors emitted by `SyncService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SyncServiceError {
    /// The message to surface to the user for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            SyncServiceError::Api(api) => api.message(),
        }
    }
}

/// Errors emitted by `VoiceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VoiceServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl VoiceServiceError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            VoiceServiceError::Api(api) => api.message(),
            VoiceServiceError::Storage(err) => err.to_string(),
        }
    }
}

/// Errors emitted by `PrefsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PrefsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RecordingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordingServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl RecordingServiceError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            RecordingServiceError::Api(api) => api.message(),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
