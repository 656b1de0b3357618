//! 의존성 좌표 템플릿(`group:artifact:{version}`) 렌더링.

use anyhow::{Result, bail};

use super::token::VersionToken;

/// 템플릿에서 버전 토큰으로 치환되는 자리표시자.
pub const VERSION_PLACEHOLDER: &str = "{version}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateTemplate {
    raw: String,
}

impl CoordinateTemplate {
    /// 자리표시자가 없는 템플릿은 거부한다.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            bail!("coordinate template is empty");
        }
        if !raw.contains(VERSION_PLACEHOLDER) {
            bail!("coordinate template `{raw}` has no {VERSION_PLACEHOLDER} placeholder");
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn render(&self, token: &VersionToken) -> String {
        self.raw.replace(VERSION_PLACEHOLDER, token.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for CoordinateTemplate {
    fn default() -> Self {
        Self {
            raw: VERSION_PLACEHOLDER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> VersionToken {
        VersionToken::from_window(s.to_string()).unwrap()
    }

    #[test]
    fn renders_maven_coordinate() {
        let template = CoordinateTemplate::parse("net.minestom:minestom-snapshots:{version}").unwrap();
        assert_eq!(
            template.render(&token("1a2b3c4d5e")),
            "net.minestom:minestom-snapshots:1a2b3c4d5e"
        );
    }

    #[test]
    fn replaces_every_placeholder() {
        let template = CoordinateTemplate::parse("lib-{version}.jar#{version}").unwrap();
        assert_eq!(
            template.render(&token("0123456789")),
            "lib-0123456789.jar#0123456789"
        );
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let err = CoordinateTemplate::parse("net.minestom:minestom-snapshots:latest").unwrap_err();
        assert!(err.to_string().contains("{version}"));
        assert!(CoordinateTemplate::parse("   ").is_err());
    }

    #[test]
    fn default_template_is_bare_token() {
        assert_eq!(
            CoordinateTemplate::default().render(&token("abcdef0123")),
            "abcdef0123"
        );
    }
}
