use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::FactoryLayout;
use crate::station::Station;

/// Work carried out at a station.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TaskProfile
{
    pub station: Station,
    pub delivery_time: f64,
    pub fatigue_cost: f64,
}

impl TaskProfile
{
    pub fn new(station: Station, delivery_time: f64, fatigue_cost: f64) -> Self
    {
        Self {
            station,
            delivery_time,
            fatigue_cost,
        }
    }
}

/// One `TaskProfile` per station, generated once per session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TaskEnvironment
{
    tasks: BTreeMap<Station, TaskProfile>,
}

impl TaskEnvironment
{
    pub fn new(tasks: Vec<TaskProfile>) -> Self
    {
        Self {
            tasks: tasks.into_iter().map(|task| (task.station, task)).collect(),
        }
    }

    pub fn uniform(factory_layout: &FactoryLayout, delivery_time: f64, fatigue_cost: f64) -> Self
    {
        Self::new(
            factory_layout
                .stations()
                .map(|station| TaskProfile::new(station, delivery_time, fatigue_cost))
                .collect(),
        )
    }

    pub fn task(&self, station: &Station) -> Option<&TaskProfile>
    {
        self.tasks.get(station)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskProfile>
    {
        self.tasks.values()
    }

    pub fn len(&self) -> usize
    {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.tasks.is_empty()
    }
}
