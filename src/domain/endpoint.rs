//! 조회 대상 원격 엔드포인트(URL) 값 객체.

use std::fmt;

use thiserror::Error;
use url::Url;

const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid endpoint URL `{input}`: {reason}")]
    Malformed { input: String, reason: String },

    #[error("unsupported endpoint scheme `{scheme}` (expected http or https)")]
    UnsupportedScheme { scheme: String },

    #[error("endpoint URL has no host: {input}")]
    MissingHost { input: String },
}

/// http/https 스킴과 호스트만 검증된 불변 URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed).map_err(|err| EndpointError::Malformed {
            input: trimmed.to_string(),
            reason: err.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(EndpointError::UnsupportedScheme {
                    scheme: other.to_string(),
                });
            }
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(EndpointError::MissingHost {
                input: trimmed.to_string(),
            });
        }

        Ok(Self { url })
    }

    /// GitHub 저장소의 최신 커밋 목록 엔드포인트를 만든다.
    /// - 첫 커밋만 필요하므로 `per_page=1`로 응답 크기를 줄인다.
    /// - `branch`가 주어지면 해당 브랜치 기준으로 조회한다.
    pub fn github_commits(
        owner: &str,
        repo: &str,
        branch: Option<&str>,
    ) -> Result<Self, EndpointError> {
        let raw = format!("{GITHUB_API_BASE}/repos/{owner}/{repo}/commits");
        let mut endpoint = Self::parse(&raw)?;

        {
            let mut query = endpoint.url.query_pairs_mut();
            query.append_pair("per_page", "1");
            if let Some(branch) = branch.map(str::trim).filter(|b| !b.is_empty()) {
                query.append_pair("sha", branch);
            }
        }

        Ok(endpoint)
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_https_url() {
        let endpoint =
            Endpoint::parse(" https://api.github.com/repos/Minestom/Minestom/commits ").unwrap();
        assert_eq!(endpoint.host(), "api.github.com");
        assert_eq!(
            endpoint.as_str(),
            "https://api.github.com/repos/Minestom/Minestom/commits"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = Endpoint::parse("ftp://example.com/commits").unwrap_err();
        assert_eq!(
            err,
            EndpointError::UnsupportedScheme {
                scheme: "ftp".to_string()
            }
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Endpoint::parse("not a url"),
            Err(EndpointError::Malformed { .. })
        ));
    }

    #[test]
    fn github_commits_limits_page_and_pins_branch() {
        let endpoint = Endpoint::github_commits("Minestom", "Minestom", Some("master")).unwrap();
        assert_eq!(
            endpoint.as_str(),
            "https://api.github.com/repos/Minestom/Minestom/commits?per_page=1&sha=master"
        );

        let default_branch = Endpoint::github_commits("Minestom", "Minestom", None).unwrap();
        assert!(default_branch.as_str().ends_with("/commits?per_page=1"));
    }
}
