use http::Extensions;
use log::{log, warn, Level};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use std::time::Instant;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_WARN_THRESHOLD: u32 = 50;

pub struct LoggingMiddleware {
    level: Level,
}

impl LoggingMiddleware {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    fn check_rate_limit(response: &Response) {
        let remaining = response
            .headers()
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());
        if let Some(remaining) = remaining {
            if remaining < RATE_LIMIT_WARN_THRESHOLD {
                warn!("GitHub API rate limit nearly exhausted: {remaining} requests left");
            }
        }
    }
}

#[async_trait::async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        request: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        log!(self.level, "{method} {url}");

        let started = Instant::now();
        let result = next.run(request, extensions).await;
        let elapsed = started.elapsed();
        match result.as_ref() {
            Ok(response) => {
                log!(
                    self.level,
                    "{method} {url} -> {} ({elapsed:?})",
                    response.status()
                );
                Self::check_rate_limit(response);
            }
            Err(e) => {
                log!(self.level, "{method} {url} failed after {elapsed:?}: {e:?}");
            }
        }
        result
    }
}
