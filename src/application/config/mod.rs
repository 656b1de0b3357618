//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::ExtractMode;

pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_MS: u64 = 500;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// API 호스트별 인증 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
    /// 이름별 의존성 고정(pin) 설정
    #[serde(default)]
    pub pins: BTreeMap<String, PinConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// `resolve`에 엔드포인트 인자가 없을 때 사용할 URL
    pub endpoint: Option<String>,
    /// 추출 전략(auto/json/marker)
    pub mode: Option<ExtractMode>,
    /// 요청 1회당 타임아웃(ms)
    pub timeout_ms: Option<u64>,
    /// 연결 장애 시 최대 시도 횟수(최초 요청 포함)
    pub max_attempts: Option<u32>,
    /// 첫 재시도 대기(ms), 이후 두 배씩 증가
    pub backoff_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PinConfig {
    pub endpoint: Option<String>,
    /// 예: `net.minestom:minestom-snapshots:{version}`
    pub coordinate: Option<String>,
    pub mode: Option<ExtractMode>,
}

/// 재시도 정책. `max_attempts`는 최소 1이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// `attempt`번째 시도(1부터) 실패 후 대기 시간.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(1u32 << shift)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(DEFAULT_BACKOFF_MS),
        )
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.defaults.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn mode(&self) -> ExtractMode {
        self.defaults.mode.unwrap_or_default()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.defaults.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            Duration::from_millis(self.defaults.backoff_ms.unwrap_or(DEFAULT_BACKOFF_MS)),
        )
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }

        for (name, incoming) in other.pins {
            if let Some(existing) = self.pins.get_mut(&name) {
                existing.merge_from(incoming);
            } else {
                self.pins.insert(name, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
        if other.max_attempts.is_some() {
            self.max_attempts = other.max_attempts;
        }
        if other.backoff_ms.is_some() {
            self.backoff_ms = other.backoff_ms;
        }
    }
}

impl HostConfig {
    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
    }
}

impl PinConfig {
    pub fn merge_from(&mut self, other: PinConfig) {
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint;
        }
        if other.coordinate.is_some() {
            self.coordinate = other.coordinate;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
    }
}
