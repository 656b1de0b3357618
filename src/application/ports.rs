//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, HostConfig};
use crate::application::error::ResolveError;
use crate::domain::Endpoint;

/// 단일 HTTP 요청 옵션.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub token: Option<String>,
}

/// 원격 응답 원문.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub body: String,
}

/// 엔드포인트 본문을 끝까지 읽어오는 포트.
#[async_trait]
pub trait CommitSource: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        options: &FetchOptions,
    ) -> Result<RawResponse, ResolveError>;
}

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 호스트 토큰 해석 결과.
#[derive(Debug, Clone, Default)]
pub struct HostTokenResolution {
    pub token: Option<String>,
    pub source: Option<String>,
}

/// 호스트별 인증 토큰을 런타임 값으로 해석하는 포트.
pub trait HostTokenResolver: Send + Sync {
    fn resolve(&self, host: &str, host_cfg: Option<&HostConfig>) -> HostTokenResolution;
}
