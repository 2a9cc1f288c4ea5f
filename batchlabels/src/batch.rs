use crate::model::{IssueId, Label, Repo};
use anyhow::{Context, Result};
use github_lib::{GitHubClient, Issue as RemoteIssue, NewLabel, StatusCode};
use log::{debug, info};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Default)]
pub struct BatchOptions {
    pub only_issues: bool,
    pub only_pull_requests: bool,
    pub hacktoberfest: bool,
}

impl BatchOptions {
    /// Hacktoberfest mode labels issues only, unless pull requests were asked
    /// for explicitly.
    pub fn skips(&self, issue: &RemoteIssue) -> bool {
        if self.only_pull_requests {
            !issue.is_pull_request()
        } else if self.only_issues || self.hacktoberfest {
            issue.is_pull_request()
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Distinct issues and pull requests touched.
    pub issues: usize,
}

impl BatchSummary {
    fn from_touched(touched: &HashSet<(String, u64)>) -> Self {
        Self {
            issues: touched.len(),
        }
    }
}

pub async fn add_labels(
    github: &GitHubClient,
    repos: &[Repo],
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let mut touched = HashSet::new();
    for repo in repos {
        for issue in &repo.issues {
            ensure_labels(github, repo, &issue.labels).await?;

            let names = issue
                .labels
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>();
            for number in resolve_issue_numbers(github, repo, issue.id, options).await? {
                github
                    .add_labels_to_issue(&repo.owner, &repo.name, number, &names)
                    .await
                    .with_context(|| format!("Cannot add labels to {repo}#{number}"))?;
                info!("added {} to {repo}#{number}", names.join(", "));
                touched.insert((repo.to_string(), number));
            }
        }
    }

    Ok(BatchSummary::from_touched(&touched))
}

pub async fn remove_labels(
    github: &GitHubClient,
    repos: &[Repo],
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let mut touched = HashSet::new();
    for repo in repos {
        for issue in &repo.issues {
            for number in resolve_issue_numbers(github, repo, issue.id, options).await? {
                for label in &issue.labels {
                    match github
                        .remove_label_from_issue(&repo.owner, &repo.name, number, &label.name)
                        .await
                    {
                        Ok(()) => info!("removed {} from {repo}#{number}", label.name),
                        Err(e) if e.is_status(StatusCode::NOT_FOUND) => {
                            debug!("{repo}#{number} does not carry {}", label.name);
                        }
                        Err(e) => {
                            return Err(anyhow::Error::new(e).context(format!(
                                "Cannot remove label {} from {repo}#{number}",
                                label.name
                            )));
                        }
                    }
                }
                touched.insert((repo.to_string(), number));
            }
        }
    }

    Ok(BatchSummary::from_touched(&touched))
}

/// Creates each label in the repository. A 422 means it is already there.
async fn ensure_labels(github: &GitHubClient, repo: &Repo, labels: &[Label]) -> Result<()> {
    for label in labels {
        let new_label = NewLabel {
            name: &label.name,
            color: label.color.as_deref(),
        };
        match github.create_label(&repo.owner, &repo.name, &new_label).await {
            Ok(created) => info!("created label {} ({}) in {repo}", created.name, created.color),
            Err(e) if e.is_status(StatusCode::UNPROCESSABLE_ENTITY) => {
                debug!("label {} already exists in {repo}", label.name);
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Cannot create label {} for {repo}", label.name)));
            }
        }
    }

    Ok(())
}

async fn resolve_issue_numbers(
    github: &GitHubClient,
    repo: &Repo,
    id: IssueId,
    options: &BatchOptions,
) -> Result<Vec<u64>> {
    if let IssueId::Number(number) = id {
        return Ok(vec![number]);
    }

    let issues = github
        .list_open_issues(&repo.owner, &repo.name)
        .await
        .with_context(|| format!("Cannot retrieve open issues for {repo}"))?;
    let total = issues.len();
    let numbers = issues
        .into_iter()
        .filter(|issue| !options.skips(issue))
        .map(|issue| issue.number)
        .collect::<Vec<_>>();
    debug!("{repo}: {} of {total} open issues selected", numbers.len());
    Ok(numbers)
}
