use crate::error::GitHubClientError;
use crate::link_urls::LinkUrls;
use crate::logging_middleware::LoggingMiddleware;
use crate::object_model::{Issue, Label, NewLabel};
use crate::result::GitHubClientResult;
use anyhow::anyhow;
use log::{debug, warn, Level};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, IntoUrl, Response, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const USER_AGENT_VALUE: &str = concat!("batchlabels/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: &str = "100";

pub struct GitHubClient {
    url: Url,
    token: Option<String>,
    client: ClientWithMiddleware,
}

impl GitHubClient {
    /// Requests are sent unauthenticated when `token` is `None`.
    pub fn new<U>(url: U, token: Option<&str>) -> GitHubClientResult<Self>
    where
        U: IntoUrl,
    {
        let client = ClientBuilder::new(Client::new())
            .with(LoggingMiddleware::new(Level::Debug))
            .build();
        Ok(Self {
            url: url
                .into_url()
                .map_err(|e| GitHubClientError::Other(anyhow!(e)))?,
            token: token.map(String::from),
            client,
        })
    }

    pub async fn list_open_issues(&self, owner: &str, repo: &str) -> GitHubClientResult<Vec<Issue>> {
        let mut url = self.endpoint(&["repos", owner, repo, "issues"])?;
        url.query_pairs_mut()
            .append_pair("state", "open")
            .append_pair("per_page", PER_PAGE);
        self.get_paged::<Issue>(url).await
    }

    pub async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        label: &NewLabel<'_>,
    ) -> GitHubClientResult<Label> {
        let url = self.endpoint(&["repos", owner, repo, "labels"])?;
        let response = self.send(self.client.post(url).json(label)).await?;
        Self::read_json::<Label>(response).await
    }

    pub async fn add_labels_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[&str],
    ) -> GitHubClientResult<Vec<Label>> {
        #[derive(Serialize)]
        struct AddLabels<'a> {
            labels: &'a [&'a str],
        }

        let url = self.endpoint(&["repos", owner, repo, "issues", &number.to_string(), "labels"])?;
        let response = self
            .send(self.client.post(url).json(&AddLabels { labels }))
            .await?;
        Self::read_json::<Vec<Label>>(response).await
    }

    pub async fn remove_label_from_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> GitHubClientResult<()> {
        let url = self.endpoint(&[
            "repos",
            owner,
            repo,
            "issues",
            &number.to_string(),
            "labels",
            label,
        ])?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> GitHubClientResult<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubClientError::Other(anyhow!("{} cannot be used as a base URL", self.url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_paged<T>(&self, url: Url) -> GitHubClientResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut all_items = Vec::new();
        let mut next_url = Some(url);
        while let Some(url) = next_url.take() {
            let response = self.send(self.client.get(url.clone())).await?;
            let link_urls = LinkUrls::from_response(&response)?;
            all_items.extend(Self::read_json::<Vec<T>>(response).await?);

            if let Some(link_urls) = link_urls {
                if link_urls.next_url == url {
                    warn!("{url} names itself as the next page, stopping");
                    break;
                }
                debug!(
                    "fetching page {:?} of {:?}",
                    LinkUrls::page_number(&link_urls.next_url),
                    link_urls.last_url.as_ref().and_then(LinkUrls::page_number)
                );
                next_url = Some(link_urls.next_url);
            }
        }

        Ok(all_items)
    }

    async fn send(&self, request_builder: RequestBuilder) -> GitHubClientResult<Response> {
        let mut request_builder = request_builder
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request_builder = request_builder.bearer_auth(token);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| GitHubClientError::Other(anyhow!(e)))?;
        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> GitHubClientResult<Response> {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => String::from(status.canonical_reason().unwrap_or("unknown error")),
        };
        Err(GitHubClientError::Status { status, message })
    }

    async fn read_json<T>(response: Response) -> GitHubClientResult<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|e| GitHubClientError::Other(anyhow!(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::GitHubClient;
    use crate::object_model::NewLabel;
    use mockito::{Matcher, Server};
    use reqwest::StatusCode;

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let github = GitHubClient::new("https://ghe.example.com/api/v3/", None).unwrap();
        let url = github
            .endpoint(&["repos", "sshaw", "batchlabels", "issues", "7", "labels", "good first issue"])
            .unwrap();
        assert_eq!(
            "https://ghe.example.com/api/v3/repos/sshaw/batchlabels/issues/7/labels/good%20first%20issue",
            url.as_str()
        );
    }

    #[tokio::test]
    async fn list_open_issues_follows_next_links() {
        let mut server = Server::new_async().await;
        let page_2 = format!("{}/repos/o/r/issues?state=open&per_page=100&page=2", server.url());
        let first = server
            .mock("GET", "/repos/o/r/issues")
            .match_query(Matcher::Exact(String::from("state=open&per_page=100")))
            .match_header("authorization", "Bearer secret")
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("link", &format!("<{page_2}>; rel=\"next\", <{page_2}>; rel=\"last\""))
            .with_body(r#"[{"number": 1, "title": "one"}]"#)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/repos/o/r/issues")
            .match_query(Matcher::Exact(String::from("state=open&per_page=100&page=2")))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"number": 2, "title": "two", "pull_request": {"url": "https://x/pulls/2"}}]"#)
            .create_async()
            .await;

        let github = GitHubClient::new(server.url(), Some("secret")).unwrap();
        let issues = github.list_open_issues("o", "r").await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(vec![1, 2], issues.iter().map(|i| i.number).collect::<Vec<_>>());
        assert!(!issues[0].is_pull_request());
        assert!(issues[1].is_pull_request());
    }

    #[tokio::test]
    async fn list_open_issues_stops_on_self_referencing_next_link() {
        let mut server = Server::new_async().await;
        let page_1 = format!("{}/repos/o/r/issues?state=open&per_page=100", server.url());
        let mock = server
            .mock("GET", "/repos/o/r/issues")
            .match_query(Matcher::Exact(String::from("state=open&per_page=100")))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("link", &format!("<{page_1}>; rel=\"next\""))
            .with_body(r#"[{"number": 1, "title": "one"}]"#)
            .expect(1)
            .create_async()
            .await;

        let github = GitHubClient::new(server.url(), None).unwrap();
        let issues = github.list_open_issues("o", "r").await.unwrap();

        mock.assert_async().await;
        assert_eq!(1, issues.len());
    }

    #[tokio::test]
    async fn create_label_omits_missing_color() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/o/r/labels")
            .match_body(Matcher::JsonString(String::from(r#"{"name": "bug"}"#)))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "bug", "color": "ededed"}"#)
            .create_async()
            .await;

        let github = GitHubClient::new(server.url(), None).unwrap();
        let label = github
            .create_label("o", "r", &NewLabel { name: "bug", color: None })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!("ededed", label.color);
    }

    #[tokio::test]
    async fn create_label_conflict_is_reported_as_status() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/repos/o/r/labels")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Validation Failed"}"#)
            .create_async()
            .await;

        let github = GitHubClient::new(server.url(), None).unwrap();
        let e = github
            .create_label("o", "r", &NewLabel { name: "bug", color: Some("ff0000") })
            .await
            .unwrap_err();

        assert!(e.is_status(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(e.to_string().contains("Validation Failed"));
    }

    #[tokio::test]
    async fn add_labels_to_issue_posts_names() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/o/r/issues/12/labels")
            .match_body(Matcher::JsonString(String::from(r#"{"labels": ["bug", "wip"]}"#)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "bug", "color": "ff0000"}, {"name": "wip", "color": "ededed"}]"#)
            .create_async()
            .await;

        let github = GitHubClient::new(server.url(), None).unwrap();
        let labels = github
            .add_labels_to_issue("o", "r", 12, &["bug", "wip"])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(2, labels.len());
    }

    #[tokio::test]
    async fn remove_label_without_json_error_body_uses_reason() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/repos/o/r/issues/3/labels/bug")
            .with_status(404)
            .with_body("gone")
            .create_async()
            .await;

        let github = GitHubClient::new(server.url(), None).unwrap();
        let e = github
            .remove_label_from_issue("o", "r", 3, "bug")
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(e.is_status(StatusCode::NOT_FOUND));
        assert_eq!("GitHub API returned 404 Not Found: Not Found", e.to_string());
    }
}
