//! 커밋 조회 포트의 HTTP 구현 어댑터.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use crate::application::error::ResolveError;
use crate::application::ports::{CommitSource, FetchOptions, RawResponse};
use crate::domain::Endpoint;

const AGENT: &str = concat!("commitpin/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// reqwest로 엔드포인트 본문 전체를 읽는 어댑터.
/// 응답 본문을 끝까지 소비하거나 drop되면 연결이 반환된다.
pub struct HttpCommitSource;

#[async_trait]
impl CommitSource for HttpCommitSource {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        options: &FetchOptions,
    ) -> Result<RawResponse, ResolveError> {
        let url = endpoint.as_str();
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|err| ResolveError::connect(url, format!("failed to build HTTP client: {err}")))?;

        let mut req = client
            .get(endpoint.url().clone())
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, GITHUB_JSON);
        if let Some(token) = &options.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|err| transport_error(url, &err))?;

        let status = resp.status();
        debug!(endpoint = url, status = status.as_u16(), "received response");
        if !status.is_success() {
            return Err(ResolveError::status(url, status.as_u16()));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = resp.text().await.map_err(|err| transport_error(url, &err))?;

        Ok(RawResponse { content_type, body })
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> ResolveError {
    ResolveError::Connectivity {
        url: url.to_string(),
        status: err.status().map(|s| s.as_u16()),
        timed_out: err.is_timeout(),
        message: err.to_string(),
    }
}
