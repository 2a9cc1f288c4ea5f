//! Token grammar:
//!
//! - `owner/name` is a repository. It receives every label specifier seen
//!   before it on the command line.
//! - `label`, `label#color` or `labelA#color,labelB` applies to all open
//!   issues of the repositories that follow.
//! - `1,2:labelA#color,labelB` applies each label to each listed issue.

use crate::error::UsageError;
use crate::model::{Issue, IssueId, Label, Repo};
use log::warn;

const LIST_SEP: char = ',';
const ID_LABEL_SEP: char = ':';
const COLOR_SEP: char = '#';
const REPO_SEP: char = '/';

pub fn build_repo_list<S>(tokens: &[S]) -> Result<Vec<Repo>, UsageError>
where
    S: AsRef<str>,
{
    let mut repos = Vec::new();
    let mut issues = Vec::new();
    let mut trailing = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        if let Some((owner, name)) = parse_repo(token) {
            repos.push(Repo {
                owner: String::from(owner),
                name: String::from(name),
                issues: issues.clone(),
            });
            trailing.clear();
            continue;
        }

        match token.split_once(ID_LABEL_SEP) {
            None => add_labels(&mut issues, IssueId::All, &parse_labels(token, token)?),
            Some((ids, labels)) => {
                let labels = parse_labels(labels, token)?;
                for id in ids.split(LIST_SEP) {
                    add_labels(&mut issues, parse_issue_id(id, token)?, &labels);
                }
            }
        }
        trailing.push(token);
    }

    if repos.is_empty() {
        return Err(UsageError::NoRepository);
    }

    if !trailing.is_empty() {
        warn!(
            "ignoring {} given after the last repository",
            trailing.join(" ")
        );
    }

    Ok(repos)
}

/// `owner/name`, where neither part can hold a separator used by label
/// specifiers.
fn parse_repo(token: &str) -> Option<(&str, &str)> {
    if token.contains([LIST_SEP, ID_LABEL_SEP, COLOR_SEP]) {
        return None;
    }

    let (owner, name) = token.split_once(REPO_SEP)?;
    if owner.is_empty() || name.is_empty() || name.contains(REPO_SEP) {
        return None;
    }

    Some((owner, name))
}

fn parse_labels(s: &str, token: &str) -> Result<Vec<Label>, UsageError> {
    s.split(LIST_SEP)
        .map(|part| {
            let (name, color) = match part.split_once(COLOR_SEP) {
                Some((name, color)) => (name, Some(color).filter(|c| !c.is_empty())),
                None => (part, None),
            };
            if name.is_empty() {
                return Err(UsageError::MissingLabelName(String::from(token)));
            }
            Ok(Label::new(name, color))
        })
        .collect()
}

fn parse_issue_id(id: &str, token: &str) -> Result<IssueId, UsageError> {
    match id.parse::<u64>() {
        Ok(n) if n > 0 => Ok(IssueId::Number(n)),
        _ => Err(UsageError::InvalidIssueId {
            id: String::from(id),
            specifier: String::from(token),
        }),
    }
}

fn add_labels(issues: &mut Vec<Issue>, id: IssueId, labels: &[Label]) {
    match issues.iter_mut().find(|issue| issue.id == id) {
        Some(issue) => issue.labels.extend_from_slice(labels),
        None => issues.push(Issue {
            id,
            labels: labels.to_vec(),
        }),
    }
}
