// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (files, env, --set, flags) --> Logging --> Command Dispatch
//!   Sync | Status | Tracking | Exec | ConfigEnv | Options | Inis | Version
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;

use gitdrive::cli::global::GlobalOptions;
use gitdrive::cli::{self, Command};
use gitdrive::cmd::config::{run_inis_command, run_options_command};
use gitdrive::cmd::git::{
    run_config_env_command, run_exec_command, run_status_command, run_tracking_command,
};
use gitdrive::cmd::sync::run_sync_command;
use gitdrive::config::loader::ConfigLoader;
use gitdrive::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use gitdrive::error::Result;
use gitdrive::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::ConfigEnv(args)) => run_config_env_command(args),
        Some(_) => run_configured(&cli).await,
        None => Err(anyhow::anyhow!(
            "no command specified, use --help for usage information"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_configured(cli: &cli::Cli) -> Result<()> {
    let workdir = working_directory(&cli.global)?;
    let loader = build_config_loader(&cli.global, &workdir)?;
    let loaded_files = loader.format_loaded_files();
    let config = loader.build().context("failed to load configuration")?;

    let _log_guard = init_logging(&build_log_config(&config, &cli.global))?;

    dispatch_command(cli, &config, &workdir, &loaded_files).await
}

async fn dispatch_command(
    cli: &cli::Cli,
    config: &Config,
    workdir: &Path,
    loaded_files: &[String],
) -> Result<()> {
    match &cli.command {
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(loaded_files);
            Ok(())
        }
        Some(Command::Sync(args)) => run_sync_command(args, config, workdir).await,
        Some(Command::Status(args)) => run_status_command(args, config, workdir).await,
        Some(Command::Tracking(args)) => run_tracking_command(args, config, workdir).await,
        Some(Command::Exec(args)) => run_exec_command(args, config, workdir).await,
        Some(Command::ConfigEnv(args)) => run_config_env_command(args),
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        None => Err(anyhow::anyhow!("no command specified")),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn working_directory(global: &GlobalOptions) -> Result<PathBuf> {
    let current = std::env::current_dir().context("failed to read the current directory")?;
    let workdir = match &global.directory {
        Some(dir) => current.join(dir),
        None => current,
    };
    anyhow::ensure!(
        workdir.is_dir(),
        "working directory {} does not exist",
        workdir.display()
    );
    Ok(workdir)
}

fn build_config_loader(global: &GlobalOptions, workdir: &Path) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(workdir.join(LOCAL_CONFIG_FILE));
    for path in &global.configs {
        loader = loader.add_toml_file(workdir.join(path));
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for assignment in global.to_config_overrides() {
        loader = loader.set_str(&assignment)?;
    }
    Ok(loader)
}

fn build_log_config(config: &Config, global: &GlobalOptions) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .with_json_file(global.log_json)
        .build()
}
