use std::collections::BTreeMap;

use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use serde::Deserialize;
use serde::Serialize;

pub type WorkerStationScores = BTreeMap<WorkerId, BTreeMap<Station, f64>>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StationDetail
{
    pub workers: Vec<WorkerId>,
    pub total_performance: f64,
    pub worker_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WorkerEfficiency
{
    pub worker_id: WorkerId,
    pub station: Station,
    pub efficiency: f64,
}

/// Result of the final assignment solver.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssignmentReport
{
    pub assignment: Assignment,
    pub worker_station_scores: WorkerStationScores,
    pub total_performance: f64,
    pub average_performance: f64,
    pub station_details: BTreeMap<Station, StationDetail>,
    /// Every placed worker, best score first.
    pub worker_efficiencies: Vec<WorkerEfficiency>,
    pub best_workers: Vec<WorkerEfficiency>,
    pub worst_workers: Vec<WorkerEfficiency>,
}
