mod error;
mod github_client;
mod link_urls;
mod logging_middleware;
mod object_model;
mod result;

pub use self::error::GitHubClientError;
pub use self::github_client::GitHubClient;
pub use self::logging_middleware::LoggingMiddleware;
pub use self::object_model::{Issue, Label, NewLabel, PullRequestLinks};
pub use self::result::GitHubClientResult;
pub use reqwest::StatusCode;
