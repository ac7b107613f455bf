//! Error kinds raised while syncing.

use std::path::PathBuf;

use karoosync_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// No settings file yet. The caller writes a template instead of failing.
    #[error("settings file {0} does not exist")]
    ConfigMissing(PathBuf),

    #[error("invalid settings: {0}")]
    ConfigInvalid(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("remote request failed: {0}")]
    RemoteRequestFailed(#[from] ClientError),

    #[error("malformed workout document: {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;
