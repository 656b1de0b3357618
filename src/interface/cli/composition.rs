//! 애플리케이션 조립(composition root) 모듈.

use std::path::PathBuf;

use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::pin_dependency::PinDependencyUseCase;
use crate::application::usecases::resolve_commit::ResolveCommitUseCase;
use crate::infrastructure::adapters::{
    HostTokenResolverAdapter, HttpCommitSource, JsonConfigRepository,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    host_token_resolver: HostTokenResolverAdapter,
    source: HttpCommitSource,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AppComposition {
    /// `--config` 경로가 있으면 최우선 설정 계층으로 추가한다.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_repo = match config_path {
            Some(path) => JsonConfigRepository::with_explicit_path(path),
            None => JsonConfigRepository::default(),
        };

        Self {
            config_repo,
            host_token_resolver: HostTokenResolverAdapter,
            source: HttpCommitSource,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 최신 커밋 해석 유스케이스를 생성한다.
    pub fn resolve_usecase(&self) -> ResolveCommitUseCase<'_> {
        ResolveCommitUseCase {
            config_repo: &self.config_repo,
            host_token_resolver: &self.host_token_resolver,
            source: &self.source,
        }
    }

    /// pin 좌표 렌더링 유스케이스를 생성한다.
    pub fn pin_usecase(&self) -> PinDependencyUseCase<'_> {
        PinDependencyUseCase {
            config_repo: &self.config_repo,
            host_token_resolver: &self.host_token_resolver,
            source: &self.source,
        }
    }
}
