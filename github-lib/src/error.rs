use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubClientError {
    #[error("GitHub API returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GitHubClientError {
    pub fn is_status(&self, status: StatusCode) -> bool {
        matches!(self, Self::Status { status: s, .. } if *s == status)
    }
}
