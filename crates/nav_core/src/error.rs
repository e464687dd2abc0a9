use std::time::Duration;

use shared::error::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("directory lookup failed: {0}")]
    Directory(#[from] DirectoryError),
    #[error("directory fetch timed out after {after:?}")]
    FetchTimedOut { after: Duration },
    #[error("directory fetch aborted before completing")]
    FetchAborted,
}

impl NavError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavError::Directory(err) if err.is_not_found())
    }
}
