use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::worker_id::WorkerId;
use crate::station::Station;

/// The learned, observation based view of a worker. Each station holds the
/// percentages recorded for it in the order the probes happened.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FactoryWorkerProfile
{
    pub worker_id: WorkerId,
    pub performance_percentages: BTreeMap<Station, Vec<f64>>,
}

impl FactoryWorkerProfile
{
    pub fn new(worker_id: WorkerId) -> Self
    {
        Self {
            worker_id,
            performance_percentages: BTreeMap::new(),
        }
    }

    pub fn record_performance_percentage(&mut self, station: Station, percentage: f64)
    {
        self.performance_percentages
            .entry(station)
            .or_default()
            .push(percentage);
    }

    /// Mean of the recorded percentages, zero when the station was never
    /// observed.
    pub fn average_percentage(&self, station: &Station) -> f64
    {
        match self.performance_percentages.get(station) {
            Some(percentages) if !percentages.is_empty() => {
                percentages.iter().sum::<f64>() / percentages.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn has_data_for_station(&self, station: &Station) -> bool
    {
        self.performance_percentages
            .get(station)
            .is_some_and(|percentages| !percentages.is_empty())
    }

    pub fn stations_with_data(&self, station_count: usize) -> usize
    {
        Station::all(station_count)
            .filter(|station| self.has_data_for_station(station))
            .count()
    }

    /// Share of stations with at least one observation, in percent.
    pub fn data_completeness(&self, station_count: usize) -> f64
    {
        if station_count == 0 {
            return 0.0;
        }
        self.stations_with_data(station_count) as f64 / station_count as f64 * 100.0
    }

    pub fn is_complete(&self, station_count: usize) -> bool
    {
        self.stations_with_data(station_count) == station_count
    }

    pub fn missing_stations(&self, station_count: usize) -> Vec<Station>
    {
        Station::all(station_count)
            .filter(|station| !self.has_data_for_station(station))
            .collect()
    }

    pub fn number_of_observations(&self) -> usize
    {
        self.performance_percentages.values().map(Vec::len).sum()
    }
}
