use vulnboard_core::{repositories::Error as RepoError, usecases::Error as BError};
use thiserror::Error;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

/// Every variant displays the message of its source unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
