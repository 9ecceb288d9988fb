use chatglm_cli::cli::Cli;
use chatglm_cli::commands;
use chatglm_cli::error::CliError;
use chatglm_cli::logger::{initialize as LoggerInitialize, level_for};
use chatglm_cli::settings::{EnvSettings, FileSettings, Settings};

use common::ErrorLocation;

use std::panic::Location;
use std::process::ExitCode;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.report(&mut std::io::stderr()),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let file = FileSettings::load_for(cli.config.as_deref())?;
    let settings = Settings::resolve(
        &cli.overrides(),
        &EnvSettings::from_process_env(),
        file.as_ref().map(|(path, settings)| (path.as_path(), settings)),
    )?;

    LoggerInitialize(level_for(settings.client.debug), cli.log_file.as_deref())?;

    match &settings.source {
        Some(path) => info!("Settings loaded from {}", path.display()),
        None => info!("No settings file, using environment and defaults"),
    }

    let output = commands::execute(&cli.command, &settings).await?;

    let rendered = serde_json::to_string_pretty(&output).map_err(|e| CliError::Output {
        message: format!("Failed to render output: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    println!("{rendered}");

    Ok(())
}
