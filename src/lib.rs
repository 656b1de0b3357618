//! commitpin library root.
//! 원격 API에서 최신 커밋을 조회해 의존성 버전 고정용 짧은 토큰을 추출한다.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

pub use application::error::{FaultKind, ResolveError};
pub use application::usecases::resolve_commit::ResolveRequest;
pub use domain::{CoordinateTemplate, Endpoint, ExtractMode, VersionToken};

use anyhow::Context;

use application::usecases::resolve_commit::resolve_with;
use infrastructure::adapters::HttpCommitSource;

/// 기본 정책(auto 추출, 타임아웃, 제한된 재시도)으로 최신 커밋 토큰을 해석한다.
pub async fn resolve(endpoint: &Endpoint) -> Result<VersionToken, ResolveError> {
    resolve_request(&ResolveRequest::new(endpoint.clone())).await
}

/// 호출자가 구성한 요청으로 해석한다.
pub async fn resolve_request(request: &ResolveRequest) -> Result<VersionToken, ResolveError> {
    resolve_with(&HttpCommitSource, request).await
}

/// build script 같은 동기 문맥용 진입점.
/// 호출 동안만 current-thread 런타임을 띄운다.
/// - 런타임 생성 실패는 로컬 오류이므로 `ResolveError`로 분류하지 않는다.
/// - 해석 장애는 `downcast_ref::<ResolveError>()`로 꺼낼 수 있다.
pub fn resolve_blocking(request: &ResolveRequest) -> anyhow::Result<VersionToken> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    Ok(runtime.block_on(resolve_request(request))?)
}
