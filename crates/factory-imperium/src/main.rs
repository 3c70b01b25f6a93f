pub mod commands;
mod printing;

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use commands::Commands;
use factory_configuration::SystemConfigurations;
use factory_orchestrator::logging::LogLevel;
use factory_orchestrator::logging::setup_logging;

#[derive(Parser)]
#[command(name = "factory-imperium", author, version, about, long_about = None)]
pub struct Cli
{
    /// Factory configuration file, `FACTORY_CONFIGURATION` or
    /// `./configuration/factory.toml` when omitted
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,
    /// Overrides the level of the log file
    #[arg(long = "log-level", value_enum, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

/// Main function of the factory-imperium command line tool
fn main()
{
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{:?}", error);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()>
{
    let system_configurations = match &cli.config {
        Some(configuration_path) => SystemConfigurations::from_path(configuration_path),
        None => SystemConfigurations::read_all_configs(),
    }
    .context("Could not load the factory configuration")?;

    let (log_handles, _guard) = setup_logging(&system_configurations.logging)?;
    if let Some(log_level) = cli.log_level {
        log_handles.set_level(log_level)?;
    }

    commands::handle_command(cli.command, system_configurations)
}
