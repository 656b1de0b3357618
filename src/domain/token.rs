//! 의존성 버전 문자열에 삽입되는 짧은 커밋 식별자.

use std::fmt;

/// 버전 토큰의 고정 길이(문자 수).
pub const TOKEN_LEN: usize = 10;

/// 정확히 [`TOKEN_LEN`]개 문자로 이루어진 버전 토큰.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionToken(String);

impl VersionToken {
    /// 길이가 맞을 때만 토큰을 만든다.
    pub(crate) fn from_window(window: String) -> Option<Self> {
        (window.chars().count() == TOKEN_LEN).then_some(Self(window))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
