//! 설정 값(token/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::HostConfig;
use crate::application::ports::HostTokenResolution;

/// Host(API) 토큰을 해석한다. inline 값이 환경변수보다 우선한다.
pub fn resolve_host_token(host_cfg: Option<&HostConfig>) -> HostTokenResolution {
    resolve_host_token_with(host_cfg, |name| env::var(name).ok())
}

pub(crate) fn resolve_host_token_with(
    host_cfg: Option<&HostConfig>,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> HostTokenResolution {
    let Some(cfg) = host_cfg else {
        return HostTokenResolution::default();
    };

    if let Some(token) = cfg.token.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return HostTokenResolution {
            token: Some(token.to_string()),
            source: Some("inline".to_string()),
        };
    }

    if let Some(env_name) = cfg.token_env.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return match lookup_env(env_name).map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => HostTokenResolution {
                token: Some(v),
                source: Some(format!("env:{env_name}")),
            },
            _ => HostTokenResolution {
                token: None,
                source: Some(format!("env:{env_name} (missing)")),
            },
        };
    }

    HostTokenResolution::default()
}
