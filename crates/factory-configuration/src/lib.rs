mod factory;
mod logging;
mod sampling;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::ensure;
use factory_scheduling_environment::FactoryLayout;
use factory_scheduling_environment::generator::SamplingRanges;
use serde::Deserialize;
use serde::Serialize;
use tracing::Level;
use tracing::event;

pub use self::factory::FactoryToml;
pub use self::logging::LoggingToml;
pub use self::sampling::SamplingToml;
pub use self::sampling::TomlRange;

pub const DEFAULT_CONFIGURATION_PATH: &str = "./configuration/factory.toml";
pub const CONFIGURATION_ENV_VAR: &str = "FACTORY_CONFIGURATION";

/// Every configuration of the system, loaded in one place and handed to the
/// orchestrator which derives the environment from it. Missing sections fall
/// back to the defaults of the original factory: six stations, an eight
/// hour horizon and the standard sampling ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfigurations
{
    pub factory: FactoryToml,
    pub sampling: SamplingToml,
    pub logging: LoggingToml,
}

impl SystemConfigurations
{
    /// Reads the file named by `FACTORY_CONFIGURATION` (also looked up in a
    /// `.env` file) or the default location.
    pub fn read_all_configs() -> Result<SystemConfigurations>
    {
        let configuration_path = dotenvy::var(CONFIGURATION_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIGURATION_PATH));

        Self::from_path(&configuration_path)
    }

    pub fn from_path(configuration_path: &Path) -> Result<SystemConfigurations>
    {
        let contents = std::fs::read_to_string(configuration_path).with_context(|| {
            format!(
                "Could not read the configuration file: {}",
                configuration_path.display()
            )
        })?;

        let system_configurations = Self::from_toml_str(&contents).with_context(|| {
            format!(
                "Invalid configuration file: {}",
                configuration_path.display()
            )
        })?;

        event!(Level::INFO, configuration_path = %configuration_path.display(), "read system configurations");
        Ok(system_configurations)
    }

    pub fn from_toml_str(contents: &str) -> Result<SystemConfigurations>
    {
        let system_configurations: SystemConfigurations =
            toml::from_str(contents).context("Could not parse the factory configuration")?;

        system_configurations.validate()?;
        Ok(system_configurations)
    }

    pub fn validate(&self) -> Result<()>
    {
        ensure!(
            self.factory.station_count > 0,
            "The factory needs at least one station"
        );
        ensure!(
            self.factory.simulation_horizon.is_finite() && self.factory.simulation_horizon >= 0.0,
            "The simulation horizon has to be a non negative number, got {}",
            self.factory.simulation_horizon
        );
        self.sampling_ranges()
            .validate()
            .context("Invalid sampling ranges")?;
        Ok(())
    }

    pub fn factory_layout(&self) -> FactoryLayout
    {
        FactoryLayout::from(&self.factory)
    }

    pub fn sampling_ranges(&self) -> SamplingRanges
    {
        SamplingRanges::from(&self.sampling)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_empty_configuration_uses_defaults() -> Result<()>
    {
        let system_configurations = SystemConfigurations::from_toml_str("")?;

        assert_eq!(system_configurations, SystemConfigurations::default());
        assert_eq!(system_configurations.factory_layout(), FactoryLayout::default());
        assert_eq!(
            system_configurations.sampling_ranges(),
            SamplingRanges::default()
        );
        Ok(())
    }

    #[test]
    fn test_partial_configuration_overrides_fields() -> Result<()>
    {
        let system_configurations = SystemConfigurations::from_toml_str(
            r#"
            [factory]
            station_count = 4

            [sampling]
            delivery_time = { low = 3.0, high = 3.5 }
            "#,
        )?;

        assert_eq!(system_configurations.factory.station_count, 4);
        assert_eq!(system_configurations.factory.simulation_horizon, 8.0);
        assert_eq!(system_configurations.sampling.delivery_time.low, 3.0);
        assert_eq!(system_configurations.sampling.skill.high, 10.0);
        Ok(())
    }

    #[test]
    fn test_zero_stations_are_rejected()
    {
        let result = SystemConfigurations::from_toml_str("[factory]\nstation_count = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_repository_configuration_file_parses() -> Result<()>
    {
        let configuration_path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configuration/factory.toml");

        let system_configurations = SystemConfigurations::from_path(&configuration_path)?;

        assert_eq!(system_configurations.factory.station_count, 6);
        Ok(())
    }
}
