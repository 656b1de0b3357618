//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::config::Config;

/// 명시 설정 경로를 지정하는 환경변수.
pub const CONFIG_ENV: &str = "COMMITPIN_CONFIG";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
/// `explicit`은 모든 탐색 경로보다 우선하는 마지막 계층이다.
pub(crate) fn load_merged_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let mut paths = config_paths();
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    load_from_paths(dedup_paths(paths))
}

/// 주어진 경로를 낮은 우선순위에서 높은 우선순위 순서로 병합한다.
/// 존재하지 않는 파일은 건너뛰고, 설정 파일이 하나도 없으면 기본값을 쓴다.
pub(crate) fn load_from_paths(paths: Vec<PathBuf>) -> Result<LoadedConfig> {
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/commitpin/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("commitpin").join("config.json"));
    }

    paths.push(PathBuf::from(".commitpin/config.json"));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
