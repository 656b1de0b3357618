//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::usecases::resolve_commit::ResolveOptions;
use crate::domain::ExtractMode;

#[derive(Debug, Parser)]
#[command(name = "commitpin")]
#[command(version)]
#[command(about = "Resolve the latest upstream commit and pin dependency versions to it")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra config file, merged last (highest priority)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the 10-character token of the latest commit
    Resolve {
        /// Endpoint URL (defaults to `defaults.endpoint` from config)
        endpoint: Option<String>,

        /// Extraction strategy
        #[arg(long, value_enum, ignore_case = true)]
        mode: Option<ExtractMode>,

        /// Per-request timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Maximum attempts on connectivity faults (including the first)
        #[arg(long)]
        attempts: Option<u32>,
    },
    /// Resolve configured pins and print the rendered dependency coordinates
    Pin {
        /// Pin name (all pins when omitted)
        name: Option<String>,
    },
    /// Show effective merged config
    Config,
}

pub enum CliAction {
    Resolve(ResolveOptions),
    Pin { name: Option<String> },
    InspectConfig,
}

/// 파싱된 실행 요청(명시 설정 경로 + 동작).
pub struct CliInvocation {
    pub config_path: Option<PathBuf>,
    pub action: CliAction,
}

impl Cli {
    pub fn parse_invocation() -> CliInvocation {
        Cli::parse().into_invocation()
    }

    fn into_invocation(self) -> CliInvocation {
        let action = match self.command {
            Commands::Resolve {
                endpoint,
                mode,
                timeout_ms,
                attempts,
            } => CliAction::Resolve(ResolveOptions {
                endpoint,
                mode,
                timeout_ms,
                max_attempts: attempts,
            }),
            Commands::Pin { name } => CliAction::Pin { name },
            Commands::Config => CliAction::InspectConfig,
        };

        CliInvocation {
            config_path: self.config,
            action,
        }
    }
}
