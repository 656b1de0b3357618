//! 해석(resolve) 실패 분류.
//!
//! 호출자가 재시도 여부를 결정할 수 있도록 연결 장애와 응답 모양 장애를 구분한다.

use thiserror::Error;

use crate::domain::ShapeError;

/// 장애 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Connectivity,
    ResponseShape,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// 연결/DNS/TLS/타임아웃/본문 읽기 실패 또는 2xx가 아닌 응답.
    #[error("connectivity fault for {url}: {message}")]
    Connectivity {
        url: String,
        status: Option<u16>,
        timed_out: bool,
        message: String,
    },

    /// 응답은 받았으나 토큰을 추출할 수 없음.
    #[error("response shape fault: {0}")]
    Shape(#[from] ShapeError),
}

impl ResolveError {
    pub fn connect(url: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::Connectivity {
            url: url.into(),
            status: None,
            timed_out: false,
            message: message.into(),
        }
    }

    pub fn status(url: impl Into<String>, status: u16) -> Self {
        ResolveError::Connectivity {
            url: url.into(),
            status: Some(status),
            timed_out: false,
            message: format!("unexpected HTTP status {status}"),
        }
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            ResolveError::Connectivity { .. } => FaultKind::Connectivity,
            ResolveError::Shape(_) => FaultKind::ResponseShape,
        }
    }

    /// 재시도로 회복될 가능성이 있는 장애인지 판단한다.
    /// - 상태코드 없는 전송 오류, 타임아웃, 429, 5xx만 재시도한다.
    pub fn is_retryable(&self) -> bool {
        match self {
            ResolveError::Connectivity {
                status: None, ..
            } => true,
            ResolveError::Connectivity {
                timed_out: true, ..
            } => true,
            ResolveError::Connectivity {
                status: Some(code), ..
            } => *code == 429 || *code >= 500,
            ResolveError::Shape(_) => false,
        }
    }
}
