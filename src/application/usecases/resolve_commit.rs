//! 최신 커밋 식별자 해석 유스케이스.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::application::config::{Config, RetryPolicy};
use crate::application::error::ResolveError;
use crate::application::ports::{
    CommitSource, ConfigRepository, FetchOptions, HostTokenResolver,
};
use crate::domain::extract::extract_token;
use crate::domain::{Endpoint, ExtractMode, VersionToken};

/// 단일 해석 요청(엔드포인트 + 추출/요청/재시도 정책).
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub endpoint: Endpoint,
    pub mode: ExtractMode,
    pub fetch: FetchOptions,
    pub retry: RetryPolicy,
}

impl ResolveRequest {
    /// 인증 없이 기본 정책으로 요청을 만든다.
    pub fn new(endpoint: Endpoint) -> Self {
        let config = Config::default();
        Self {
            endpoint,
            mode: config.mode(),
            fetch: FetchOptions {
                timeout: config.timeout(),
                token: None,
            },
            retry: config.retry_policy(),
        }
    }
}

/// 본문을 받아 토큰을 추출한다.
/// - 연결 장애는 정책 한도 안에서 재시도하고, 모양 장애는 즉시 반환한다.
pub async fn resolve_with(
    source: &dyn CommitSource,
    request: &ResolveRequest,
) -> Result<VersionToken, ResolveError> {
    let mut attempt = 1;
    loop {
        debug!(endpoint = %request.endpoint, attempt, "fetching latest commit");

        match source.fetch(&request.endpoint, &request.fetch).await {
            Ok(raw) => {
                let token = extract_token(request.mode, raw.content_type.as_deref(), &raw.body)
                    .inspect_err(|err| {
                        warn!(endpoint = %request.endpoint, error = %err, "unexpected response shape");
                    })?;
                info!(endpoint = %request.endpoint, token = %token, "resolved latest commit");
                return Ok(token);
            }
            Err(err) if err.is_retryable() && attempt < request.retry.max_attempts => {
                let delay = request.retry.delay_after(attempt);
                warn!(
                    endpoint = %request.endpoint,
                    attempt,
                    max_attempts = request.retry.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "fetch failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// CLI/설정 입력 덮어쓰기 값.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub endpoint: Option<String>,
    pub mode: Option<ExtractMode>,
    pub timeout_ms: Option<u64>,
    pub max_attempts: Option<u32>,
}

/// 설정과 입력값을 합쳐 엔드포인트의 최신 커밋 토큰을 해석한다.
pub struct ResolveCommitUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub host_token_resolver: &'a dyn HostTokenResolver,
    pub source: &'a dyn CommitSource,
}

impl<'a> ResolveCommitUseCase<'a> {
    pub async fn execute(&self, options: ResolveOptions) -> Result<VersionToken> {
        let config = self.config_repo.load().context("failed to load config")?;

        let raw_endpoint = options
            .endpoint
            .or_else(|| config.defaults.endpoint.clone())
            .context("no endpoint given and defaults.endpoint is not configured")?;

        let mut request = build_request(&config, self.host_token_resolver, &raw_endpoint)?;
        if let Some(mode) = options.mode {
            request.mode = mode;
        }
        if let Some(timeout_ms) = options.timeout_ms {
            request.fetch.timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(max_attempts) = options.max_attempts {
            request.retry = RetryPolicy::new(max_attempts, request.retry.backoff);
        }

        resolve_with(self.source, &request)
            .await
            .with_context(|| format!("failed to resolve latest commit from {raw_endpoint}"))
    }
}

/// 설정 기본값과 호스트 토큰을 반영한 요청을 만든다.
pub(crate) fn build_request(
    config: &Config,
    host_token_resolver: &dyn HostTokenResolver,
    raw_endpoint: &str,
) -> Result<ResolveRequest> {
    let endpoint = Endpoint::parse(raw_endpoint)?;
    let host_cfg = config.host_config(endpoint.host());
    let token = host_token_resolver.resolve(endpoint.host(), host_cfg);
    if let Some(source) = token.source.as_deref() {
        debug!(host = endpoint.host(), source, "host token source");
    }

    Ok(ResolveRequest {
        endpoint,
        mode: config.mode(),
        fetch: FetchOptions {
            timeout: config.timeout(),
            token: token.token,
        },
        retry: config.retry_policy(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::config::HostConfig;
    use crate::application::ports::{HostTokenResolution, RawResponse};
    use crate::domain::ShapeError;

    /// 미리 정한 응답을 순서대로 돌려주는 가짜 소스.
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        replies: Mutex<VecDeque<Result<RawResponse, ResolveError>>>,
        pub calls: AtomicUsize,
        pub last_token: Mutex<Option<String>>,
    }

    impl ScriptedSource {
        pub(crate) fn new(replies: Vec<Result<RawResponse, ResolveError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Self::default()
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommitSource for ScriptedSource {
        async fn fetch(
            &self,
            endpoint: &Endpoint,
            options: &FetchOptions,
        ) -> Result<RawResponse, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_token.lock().unwrap() = options.token.clone();
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ResolveError::connect(endpoint.as_str(), "no reply scripted")))
        }
    }

    pub(crate) struct StaticConfig(pub Config);

    impl ConfigRepository for StaticConfig {
        fn load(&self) -> Result<Config> {
            Ok(self.0.clone())
        }

        fn inspect_pretty_json(&self) -> Result<String> {
            Ok(serde_json::to_string_pretty(&self.0)?)
        }
    }

    pub(crate) struct InlineTokens;

    impl HostTokenResolver for InlineTokens {
        fn resolve(&self, _host: &str, host_cfg: Option<&HostConfig>) -> HostTokenResolution {
            HostTokenResolution {
                token: host_cfg.and_then(|h| h.token.clone()),
                source: host_cfg.and_then(|h| h.token.as_ref()).map(|_| "inline".to_string()),
            }
        }
    }

    pub(crate) fn json_reply(body: &str) -> Result<RawResponse, ResolveError> {
        Ok(RawResponse {
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string(),
        })
    }

    fn request(max_attempts: u32) -> ResolveRequest {
        let mut request =
            ResolveRequest::new(Endpoint::parse("https://api.github.com/repos/a/b/commits").unwrap());
        request.retry = RetryPolicy::new(max_attempts, Duration::ZERO);
        request
    }

    #[tokio::test]
    async fn resolves_token_from_first_reply() {
        let source = ScriptedSource::new(vec![json_reply(
            r#"[{"sha":"0123456789abcdef0123456789abcdef01234567"}]"#,
        )]);

        let token = resolve_with(&source, &request(3)).await.unwrap();

        assert_eq!(token.as_str(), "0123456789");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn retries_connectivity_faults_until_success() {
        let source = ScriptedSource::new(vec![
            Err(ResolveError::connect("u", "connection reset")),
            Err(ResolveError::status("u", 502)),
            json_reply(r#"{"sha":"fedcba9876543210"}"#),
        ]);

        let token = resolve_with(&source, &request(3)).await.unwrap();

        assert_eq!(token.as_str(), "fedcba9876");
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let source = ScriptedSource::new(vec![
            Err(ResolveError::connect("u", "refused")),
            Err(ResolveError::connect("u", "refused")),
            Err(ResolveError::connect("u", "refused")),
        ]);

        let err = resolve_with(&source, &request(2)).await.unwrap_err();

        assert!(matches!(err, ResolveError::Connectivity { .. }));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let source = ScriptedSource::new(vec![
            Err(ResolveError::status("u", 404)),
            json_reply(r#"{"sha":"fedcba9876543210"}"#),
        ]);

        let err = resolve_with(&source, &request(3)).await.unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Connectivity {
                status: Some(404),
                ..
            }
        ));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn shape_faults_are_not_retried() {
        let source = ScriptedSource::new(vec![
            json_reply(r#"{"message":"Not Found"}"#),
            json_reply(r#"{"sha":"fedcba9876543210"}"#),
        ]);

        let err = resolve_with(&source, &request(3)).await.unwrap_err();

        assert!(matches!(err, ResolveError::Shape(ShapeError::MissingHash)));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn usecase_uses_configured_endpoint_and_host_token() {
        let config: Config = serde_json::from_str(
            r#"{
                "defaults": {"endpoint": "https://api.github.com/repos/Minestom/Minestom/commits", "max_attempts": 1},
                "hosts": {"api.github.com": {"token": "ghp_test"}}
            }"#,
        )
        .unwrap();
        let config_repo = StaticConfig(config);
        let source = ScriptedSource::new(vec![json_reply(r#"[{"sha":"abcdefabcdef1234"}]"#)]);
        let usecase = ResolveCommitUseCase {
            config_repo: &config_repo,
            host_token_resolver: &InlineTokens,
            source: &source,
        };

        let token = usecase.execute(ResolveOptions::default()).await.unwrap();

        assert_eq!(token.as_str(), "abcdefabcd");
        assert_eq!(source.last_token.lock().unwrap().as_deref(), Some("ghp_test"));
    }

    #[tokio::test]
    async fn usecase_mode_override_selects_marker_extraction() {
        let config_repo = StaticConfig(Config::default());
        let source = ScriptedSource::new(vec![json_reply("prefixshaXYZ0123456789shasuffix")]);
        let usecase = ResolveCommitUseCase {
            config_repo: &config_repo,
            host_token_resolver: &InlineTokens,
            source: &source,
        };

        let token = usecase
            .execute(ResolveOptions {
                endpoint: Some("http://localhost:8080/commits".to_string()),
                mode: Some(ExtractMode::Marker),
                ..ResolveOptions::default()
            })
            .await
            .unwrap();

        assert_eq!(token.as_str(), "0123456789");
    }

    #[tokio::test]
    async fn usecase_keeps_typed_fault_behind_context() {
        let config_repo = StaticConfig(Config::default());
        let source = ScriptedSource::new(vec![Err(ResolveError::status("u", 404))]);
        let usecase = ResolveCommitUseCase {
            config_repo: &config_repo,
            host_token_resolver: &InlineTokens,
            source: &source,
        };

        let err = usecase
            .execute(ResolveOptions {
                endpoint: Some("https://example.com/commits".to_string()),
                ..ResolveOptions::default()
            })
            .await
            .unwrap_err();

        let fault = err.downcast_ref::<ResolveError>().unwrap();
        assert_eq!(fault.kind(), crate::application::error::FaultKind::Connectivity);
        assert!(format!("{err:#}").contains("example.com"));
    }

    #[tokio::test]
    async fn usecase_requires_an_endpoint() {
        let config_repo = StaticConfig(Config::default());
        let source = ScriptedSource::default();
        let usecase = ResolveCommitUseCase {
            config_repo: &config_repo,
            host_token_resolver: &InlineTokens,
            source: &source,
        };

        let err = usecase.execute(ResolveOptions::default()).await.unwrap_err();

        assert!(err.to_string().contains("defaults.endpoint"));
        assert_eq!(source.calls(), 0);
    }
}
