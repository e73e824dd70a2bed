// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (mod.toml, --ini, MOD_*, --set) --> Logging
//!   --> Command Dispatch
//!         Config | Bump | SetVersion | Dependency | About
//!         Branches | Merge | Branch | Update | Release
//! ```

use std::process::ExitCode;

use modbuild_rs::cli::global::GlobalOptions;
use modbuild_rs::cli::{self, Command};
use modbuild_rs::cmd::build::run_update_command;
use modbuild_rs::cmd::config::{run_config_command, run_inis_command, run_options_command};
use modbuild_rs::cmd::current_context;
use modbuild_rs::cmd::merge::{run_branch_command, run_branches_command, run_merge_command};
use modbuild_rs::cmd::project::{
    run_about_command, run_bump_command, run_dependency_command, run_set_version_command,
};
use modbuild_rs::cmd::release::run_release_command;
use modbuild_rs::config::loader::ConfigLoader;
use modbuild_rs::config::Config;
use modbuild_rs::error::{Result, bail_out};
use modbuild_rs::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, loaded_files) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config, &loaded_files).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, loaded_files: &[String]) -> Result<()> {
    let dry_run = config.global.dry;
    let Some(command) = &cli.command else {
        return Err(bail_out("no command specified, use --help for usage information").into());
    };

    match command {
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Inis => {
            run_inis_command(loaded_files);
            Ok(())
        }
        Command::Config(args) => run_config_command(args, dry_run),
        Command::Bump(args) => run_bump_command(&mut current_context()?, args, dry_run),
        Command::SetVersion(args) => {
            run_set_version_command(&mut current_context()?, args, dry_run)
        }
        Command::Dependency(args) => {
            run_dependency_command(&mut current_context()?, args, dry_run)
        }
        Command::About => run_about_command(&current_context()?, dry_run).await,
        Command::Branches => run_branches_command(&current_context()?),
        Command::Merge(args) => run_merge_command(&current_context()?, args, config).await,
        Command::Branch(args) => run_branch_command(&current_context()?, args, dry_run),
        Command::Update(args) => run_update_command(&mut current_context()?, args, config).await,
        Command::Release(args) => {
            run_release_command(&mut current_context()?, args, config).await
        }
    }
}

fn load_config(global: &GlobalOptions) -> Result<(Config, Vec<String>)> {
    let loader = ConfigLoader::layered(&global.inis, &global.to_config_overrides())?;
    let loaded_files = loader.format_loaded_files();
    let config = loader.build()?;
    Ok((config, loaded_files))
}
