use thiserror::Error;

use crate::worker_environment::worker_id::WorkerId;

#[derive(Debug, Error, PartialEq)]
pub enum SchedulingEnvironmentError
{
    #[error("station {station} is outside of the factory layout [1, {station_count}]")]
    StationOutOfRange { station: usize, station_count: usize },
    #[error("the factory layout has to contain at least one station")]
    NoStations,
    #[error("worker {0} is not part of the worker environment")]
    UnknownWorker(WorkerId),
    #[error("worker {0} is already part of the worker environment")]
    DuplicateWorker(WorkerId),
    #[error("worker {worker_id} has {skills} skills but the factory has {station_count} stations")]
    SkillCountMismatch {
        worker_id: WorkerId,
        skills: usize,
        station_count: usize,
    },
    #[error("{tasks} task profiles were given for {station_count} stations")]
    TaskCountMismatch { tasks: usize, station_count: usize },
    #[error("sampling range for {name} is invalid: [{low}, {high}]")]
    InvalidSamplingRange { name: &'static str, low: f64, high: f64 },
}
