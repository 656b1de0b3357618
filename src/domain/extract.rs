//! 응답 본문에서 버전 토큰을 추출하는 규칙.
//!
//! 두 가지 전략을 제공한다.
//! - `json`: 본문을 JSON으로 디코딩하고 커밋 해시 필드를 이름으로 읽는다.
//! - `marker`: 본문을 평문으로 보고 `sha` 마커 뒤 고정 오프셋 구간을 잘라낸다.
//!
//! 두 전략 모두 네트워크와 무관한 순수 함수다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::token::{TOKEN_LEN, VersionToken};

/// 평문 추출에서 사용하는 마커 문자열.
pub const MARKER: &str = "sha";
/// 마커 뒤 조각에서 건너뛸 문자 수(`":"` 같은 구두점).
pub const WINDOW_OFFSET: usize = 3;

// 커밋 목록/브랜치/ref API 응답에서 해시가 놓이는 위치.
const HASH_PATHS: &[&[&str]] = &[&["sha"], &["commit", "sha"], &["object", "sha"]];

/// 응답 모양이 기대와 달라 토큰을 만들 수 없는 경우.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("marker `{marker}` found {occurrences} time(s), need at least 2", marker = MARKER)]
    MarkerMissing { occurrences: usize },

    #[error("fragment after marker has {len} characters, need at least {needed}")]
    FragmentTooShort { len: usize, needed: usize },

    #[error("response body is not valid JSON: {0}")]
    NotJson(String),

    #[error("response JSON is an empty array")]
    EmptyList,

    #[error("response JSON has no commit hash field (tried sha, commit.sha, object.sha)")]
    MissingHash,

    #[error("commit hash `{value}` is not a hex string of at least {min} characters", min = TOKEN_LEN)]
    InvalidHash { value: String },
}

/// 추출 전략 선택값.
/// CLI(`--mode`)와 설정 파일(`mode`)이 같은 이름을 쓴다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    // Content-Type/본문 모양을 보고 결정한다.
    #[default]
    #[value(help = "JSON when the response looks like JSON, marker otherwise")]
    Auto,
    #[value(help = "Read the commit hash field from the JSON payload")]
    Json,
    #[value(help = "Legacy text scan: window [3, 13) after the first `sha` marker")]
    Marker,
}

impl ExtractMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractMode::Auto => "auto",
            ExtractMode::Json => "json",
            ExtractMode::Marker => "marker",
        }
    }

    /// `auto`를 실제 전략으로 해석한다.
    pub fn resolve(self, content_type: Option<&str>, body: &str) -> ExtractMode {
        match self {
            ExtractMode::Auto => {
                let json_header = content_type.is_some_and(|ct| ct.contains("json"));
                let trimmed = body.trim_start();
                if json_header || trimmed.starts_with('{') || trimmed.starts_with('[') {
                    ExtractMode::Json
                } else {
                    ExtractMode::Marker
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ExtractMode::Auto),
            "json" => Ok(ExtractMode::Json),
            "marker" => Ok(ExtractMode::Marker),
            other => Err(format!(
                "unknown extract mode `{other}` (expected auto, json or marker)"
            )),
        }
    }
}

/// 선택된 전략으로 본문에서 토큰을 추출한다.
pub fn extract_token(
    mode: ExtractMode,
    content_type: Option<&str>,
    body: &str,
) -> Result<VersionToken, ShapeError> {
    match mode.resolve(content_type, body) {
        ExtractMode::Marker => extract_by_marker(body),
        _ => extract_from_json(body),
    }
}

/// 줄바꿈을 제거해 본문을 하나의 연속 문자열로 합친다.
/// `\n`, `\r\n`, 단독 `\r` 모두 줄 경계로 본다.
pub fn flatten_lines(body: &str) -> String {
    body.split(['\r', '\n']).collect()
}

/// `sha` 마커로 나눈 두 번째 조각에서 `[3, 13)` 문자 구간을 토큰으로 쓴다.
pub fn extract_by_marker(body: &str) -> Result<VersionToken, ShapeError> {
    let flat = flatten_lines(body);
    let mut fragments = flat.split(MARKER);
    let occurrences = flat.matches(MARKER).count();
    if occurrences < 2 {
        return Err(ShapeError::MarkerMissing { occurrences });
    }

    // occurrences >= 2 이므로 두 번째 조각은 항상 존재한다.
    let fragment = fragments.nth(1).unwrap_or_default();
    let needed = WINDOW_OFFSET + TOKEN_LEN;
    let len = fragment.chars().count();
    if len < needed {
        return Err(ShapeError::FragmentTooShort { len, needed });
    }

    let window: String = fragment.chars().skip(WINDOW_OFFSET).take(TOKEN_LEN).collect();
    VersionToken::from_window(window).ok_or(ShapeError::FragmentTooShort { len, needed })
}

/// JSON 응답에서 커밋 해시 필드를 찾아 앞 10자를 토큰으로 쓴다.
pub fn extract_from_json(body: &str) -> Result<VersionToken, ShapeError> {
    let json: Value =
        serde_json::from_str(body).map_err(|err| ShapeError::NotJson(err.to_string()))?;

    let commit = match &json {
        Value::Array(items) => items.first().ok_or(ShapeError::EmptyList)?,
        other => other,
    };

    let hash = HASH_PATHS
        .iter()
        .find_map(|path| str_at(commit, path))
        .ok_or(ShapeError::MissingHash)?;

    if hash.len() < TOKEN_LEN || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ShapeError::InvalidHash {
            value: hash.to_string(),
        });
    }

    VersionToken::from_window(hash[..TOKEN_LEN].to_string()).ok_or(ShapeError::InvalidHash {
        value: hash.to_string(),
    })
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut cur = value;
    for key in path {
        cur = cur.get(*key)?;
    }

    cur.as_str().map(str::trim).filter(|s| !s.is_empty())
}
