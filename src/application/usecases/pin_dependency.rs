//! 설정된 pin 항목을 최신 커밋으로 해석해 의존성 좌표를 만드는 유스케이스.

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::application::ports::{CommitSource, ConfigRepository, HostTokenResolver};
use crate::application::usecases::resolve_commit::{build_request, resolve_with};
use crate::domain::{CoordinateTemplate, VersionToken};

/// pin 해석 결과 한 건.
#[derive(Debug, Clone)]
pub struct PinnedCoordinate {
    pub name: String,
    pub token: VersionToken,
    pub coordinate: String,
}

pub struct PinDependencyUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub host_token_resolver: &'a dyn HostTokenResolver,
    pub source: &'a dyn CommitSource,
}

impl<'a> PinDependencyUseCase<'a> {
    /// `name`이 없으면 설정된 모든 pin을 이름순으로 해석한다.
    /// - 하나라도 실패하면 전체가 실패한다(부분 결과 없음).
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<PinnedCoordinate>> {
        let config = self.config_repo.load().context("failed to load config")?;
        if config.pins.is_empty() {
            bail!("no pins configured (add a `pins` section to the config)");
        }

        let selected: Vec<_> = match name {
            Some(name) => {
                let Some(pin) = config.pins.get(name) else {
                    let known: Vec<_> = config.pins.keys().map(String::as_str).collect();
                    bail!("unknown pin `{name}` (configured: {})", known.join(", "));
                };
                vec![(name.to_string(), pin.clone())]
            }
            None => config
                .pins
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };

        let mut out = Vec::with_capacity(selected.len());
        for (name, pin) in selected {
            let raw_endpoint = pin
                .endpoint
                .clone()
                .or_else(|| config.defaults.endpoint.clone())
                .with_context(|| format!("pin `{name}` has no endpoint"))?;
            let template = match pin.coordinate.as_deref() {
                Some(raw) => CoordinateTemplate::parse(raw)
                    .with_context(|| format!("pin `{name}` has an invalid coordinate"))?,
                None => CoordinateTemplate::default(),
            };

            let mut request = build_request(&config, self.host_token_resolver, &raw_endpoint)
                .with_context(|| format!("pin `{name}` has an invalid endpoint"))?;
            if let Some(mode) = pin.mode {
                request.mode = mode;
            }

            debug!(pin = %name, endpoint = %request.endpoint, mode = %request.mode, "resolving pin");
            let token = resolve_with(self.source, &request)
                .await
                .with_context(|| format!("failed to resolve pin `{name}` from {raw_endpoint}"))?;

            out.push(PinnedCoordinate {
                coordinate: template.render(&token),
                name,
                token,
            });
        }

        Ok(out)
    }
}
