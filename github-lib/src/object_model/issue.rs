use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Issue {
    #[serde(rename = "number")]
    pub number: u64,

    #[serde(rename = "title")]
    pub title: String,

    #[serde(rename = "pull_request", default)]
    pub pull_request: Option<PullRequestLinks>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct PullRequestLinks {
    #[serde(rename = "url")]
    pub url: String,
}
