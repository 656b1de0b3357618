//! `commitpin` 바이너리 진입점.

use commitpin::interface::cli::{AppComposition, Cli, CliAction};
use commitpin::{FaultKind, ResolveError};

const EXIT_FAILURE: i32 = 1;
const EXIT_CONNECTIVITY: i32 = 3;
const EXIT_RESPONSE_SHAPE: i32 = 4;

#[tokio::main]
async fn main() {
    // stdout은 토큰/좌표 출력 전용이므로 로그는 stderr로 보낸다.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let invocation = Cli::parse_invocation();
    let composition = AppComposition::new(invocation.config_path);

    let result = match invocation.action {
        CliAction::InspectConfig => composition
            .inspect_config_usecase()
            .execute()
            .map(|json| println!("{json}")),
        CliAction::Resolve(options) => composition
            .resolve_usecase()
            .execute(options)
            .await
            .map(|token| println!("{token}")),
        CliAction::Pin { name } => {
            let single = name.is_some();
            composition
                .pin_usecase()
                .execute(name.as_deref())
                .await
                .map(|pinned| {
                    for pin in pinned {
                        if single {
                            println!("{}", pin.coordinate);
                        } else {
                            println!("{} = {}", pin.name, pin.coordinate);
                        }
                    }
                })
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        let code = match err.downcast_ref::<ResolveError>().map(ResolveError::kind) {
            Some(FaultKind::Connectivity) => EXIT_CONNECTIVITY,
            Some(FaultKind::ResponseShape) => EXIT_RESPONSE_SHAPE,
            None => EXIT_FAILURE,
        };
        std::process::exit(code);
    }
}
