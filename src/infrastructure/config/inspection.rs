//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_host_token;
use crate::application::config::{DefaultsConfig, PinConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub hosts: BTreeMap<String, HostInspection>,
    pub pins: BTreeMap<String, PinConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub endpoint: Option<String>,
    pub mode: String,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

/// 토큰 값 자체는 노출하지 않고 출처만 보여준다.
#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = loaded.config;
        let retry = config.retry_policy();

        let effective_defaults = EffectiveDefaults {
            endpoint: config.defaults.endpoint.clone(),
            mode: config.mode().to_string(),
            timeout_ms: config.timeout().as_millis() as u64,
            max_attempts: retry.max_attempts,
            backoff_ms: retry.backoff.as_millis() as u64,
        };

        let hosts = config
            .hosts
            .iter()
            .map(|(host, cfg)| {
                let resolved = resolve_host_token(Some(cfg));
                (
                    host.clone(),
                    HostInspection {
                        token_source: resolved.source,
                        token_resolved: resolved.token.is_some(),
                    },
                )
            })
            .collect();

        Self {
            searched_paths: to_strings(&loaded.searched_paths),
            loaded_paths: to_strings(&loaded.loaded_paths),
            defaults: config.defaults,
            effective_defaults,
            hosts,
            pins: config.pins,
        }
    }
}

fn to_strings(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::config::Config;

    #[test]
    fn reports_effective_values_without_leaking_tokens() {
        let config: Config = serde_json::from_str(
            r#"{
                "defaults": {"mode": "json", "max_attempts": 5},
                "hosts": {"api.github.com": {"token": "secret-token"}},
                "pins": {"minestom": {"coordinate": "net.minestom:minestom-snapshots:{version}"}}
            }"#,
        )
        .unwrap();
        let loaded = LoadedConfig {
            config,
            searched_paths: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
            loaded_paths: vec![PathBuf::from("b.json")],
        };

        let inspection = ConfigInspection::from_loaded(loaded);
        let json = serde_json::to_string(&inspection).unwrap();

        assert_eq!(inspection.effective_defaults.mode, "json");
        assert_eq!(inspection.effective_defaults.max_attempts, 5);
        assert_eq!(inspection.effective_defaults.timeout_ms, 15_000);
        assert!(inspection.hosts["api.github.com"].token_resolved);
        assert_eq!(inspection.loaded_paths, vec!["b.json".to_string()]);
        assert!(json.contains("minestom-snapshots"));
        assert!(!json.contains("secret-token"));
    }
}
