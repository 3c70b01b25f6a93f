use serde::Deserialize;
use serde::Serialize;
use tracing::Level;
use tracing::event;

use super::worker_id::WorkerId;
use crate::station::Station;
use crate::task_environment::TaskProfile;

/// Below this value of `k * T` the energy decay over the horizon is treated as
/// negligible.
const NEGLIGIBLE_DECAY: f64 = 0.001;

/// Offset added to the fatigue base so that the decay rate is always finite.
const FATIGUE_BASE_OFFSET: f64 = 5.0;

/// Ground truth of a worker. Only the simulation reads this; the decision
/// logic works exclusively on the `FactoryWorkerProfile`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrueWorkerProfile
{
    pub worker_id: WorkerId,
    pub skills: Vec<f64>,
    pub fatigue_base: f64,
}

impl TrueWorkerProfile
{
    pub fn new(worker_id: WorkerId, skills: Vec<f64>, fatigue_base: f64) -> Self
    {
        Self {
            worker_id,
            skills,
            fatigue_base,
        }
    }

    pub fn skill(&self, station: &Station) -> f64
    {
        match self.skills.get(station.index()) {
            Some(skill) => *skill,
            None => {
                event!(
                    Level::ERROR,
                    worker_id = %self.worker_id,
                    station = %station,
                    skills = self.skills.len(),
                    "true worker has no skill for station"
                );
                debug_assert!(false, "true worker {} has no skill for {}", self.worker_id, station);
                0.0
            }
        }
    }

    /// Time average of an exponentially decaying energy level over the
    /// horizon. Always in (0, 1].
    pub fn energy_average(&self, fatigue_cost: f64, horizon: f64) -> f64
    {
        let k = fatigue_cost / (self.fatigue_base + FATIGUE_BASE_OFFSET);
        energy_average(k * horizon)
    }

    pub fn performance(&self, station: &Station, task: &TaskProfile, horizon: f64) -> f64
    {
        let energy_average = self.energy_average(task.fatigue_cost, horizon);
        (self.skill(station) / task.delivery_time) * energy_average
    }
}

pub fn energy_average(decay: f64) -> f64
{
    if decay < NEGLIGIBLE_DECAY {
        1.0
    } else {
        (1.0 - (-decay).exp()) / decay
    }
}
