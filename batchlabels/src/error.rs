use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("No repository given")]
    NoRepository,

    #[error("No labels given")]
    NoLabels,

    #[error("Label name missing in \"{0}\"")]
    MissingLabelName(String),

    #[error("Invalid issue ID \"{id}\" in \"{specifier}\"")]
    InvalidIssueId { id: String, specifier: String },

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("{0:#}")]
    Remote(anyhow::Error),
}

impl BatchError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Remote(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BatchError, UsageError};
    use anyhow::anyhow;

    #[test]
    fn exit_codes() {
        assert_eq!(2, BatchError::from(UsageError::NoRepository).exit_code());
        assert_eq!(3, BatchError::Remote(anyhow!("boom")).exit_code());
    }

    #[test]
    fn remote_error_shows_whole_chain() {
        let e = BatchError::Remote(anyhow!("GitHub API returned 500").context("Failed to add labels"));
        assert_eq!("Failed to add labels: GitHub API returned 500", e.to_string());
    }
}
