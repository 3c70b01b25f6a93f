use factory_scheduling_environment::DEFAULT_SIMULATION_HORIZON;
use factory_scheduling_environment::DEFAULT_STATION_COUNT;
use factory_scheduling_environment::FactoryLayout;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FactoryToml
{
    pub station_count: usize,
    pub simulation_horizon: f64,
}

impl Default for FactoryToml
{
    fn default() -> Self
    {
        Self {
            station_count: DEFAULT_STATION_COUNT,
            simulation_horizon: DEFAULT_SIMULATION_HORIZON,
        }
    }
}

impl From<&FactoryToml> for FactoryLayout
{
    fn from(value: &FactoryToml) -> Self
    {
        FactoryLayout {
            station_count: value.station_count,
            simulation_horizon: value.simulation_horizon,
        }
    }
}
