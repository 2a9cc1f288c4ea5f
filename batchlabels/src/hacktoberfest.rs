use crate::model::{Issue, IssueId, Label, Repo};

const LABEL_NAME: &str = "hacktoberfest";
const LABEL_COLOR: &str = "ff9a56";

pub fn label() -> Label {
    Label::new(LABEL_NAME, Some(LABEL_COLOR))
}

/// Adds the hacktoberfest label to each repository.
///
/// When a repository was given nothing but bare numbers (`add 3 7 owner/repo`)
/// those numbers name the issues to label. Otherwise every open issue gets the
/// label alongside whatever else was asked for.
pub fn add_hacktoberfest_issues(repos: &mut [Repo]) {
    for repo in repos {
        match issue_numbers(&repo.issues) {
            Some(numbers) => {
                repo.issues = numbers
                    .into_iter()
                    .map(|n| Issue {
                        id: IssueId::Number(n),
                        labels: vec![label()],
                    })
                    .collect();
            }
            None => repo.issues.push(Issue {
                id: IssueId::All,
                labels: vec![label()],
            }),
        }
    }
}

fn issue_numbers(issues: &[Issue]) -> Option<Vec<u64>> {
    if issues.is_empty() {
        return None;
    }

    let mut numbers = Vec::new();
    for issue in issues {
        if issue.id != IssueId::All {
            return None;
        }
        for label in &issue.labels {
            if label.color.is_some() || !label.name.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            numbers.push(label.name.parse::<u64>().ok().filter(|n| *n > 0)?);
        }
    }

    Some(numbers)
}
