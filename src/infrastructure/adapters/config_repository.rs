//! 설정 저장소 포트 구현 어댑터.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::application::ports::ConfigRepository;
use crate::infrastructure::config::Config;

/// 탐색 경로 + (선택) `--config` 경로를 병합하는 JSON 설정 저장소.
#[derive(Debug, Clone, Default)]
pub struct JsonConfigRepository {
    explicit: Option<PathBuf>,
}

impl JsonConfigRepository {
    /// 명시 경로는 가장 높은 우선순위로 병합되며, 반드시 존재해야 한다.
    pub fn with_explicit_path(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit: Some(path.into()),
        }
    }

    fn explicit_path(&self) -> Result<Option<&Path>> {
        match self.explicit.as_deref() {
            Some(path) if !path.is_file() => {
                bail!("config file not found: {}", path.display())
            }
            other => Ok(other),
        }
    }
}

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<Config> {
        Config::load(self.explicit_path()?)
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Config::inspect_pretty_json(self.explicit_path()?)
    }
}
