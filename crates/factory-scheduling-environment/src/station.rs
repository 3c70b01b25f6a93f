use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::SchedulingEnvironmentError;

/// A production station. Stations are numbered from one and their order is
/// significant: every tie-break in the collection and assignment algorithms
/// favours the lower numbered station.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
#[serde(transparent)]
pub struct Station(usize);

impl Station
{
    pub fn new(number: usize, station_count: usize) -> Result<Self, SchedulingEnvironmentError>
    {
        if number == 0 || number > station_count {
            return Err(SchedulingEnvironmentError::StationOutOfRange {
                station: number,
                station_count,
            });
        }
        Ok(Self(number))
    }

    /// Every station of a factory with `station_count` stations in ascending
    /// order.
    pub fn all(station_count: usize) -> impl Iterator<Item = Station>
    {
        (1..=station_count).map(Station)
    }

    pub(crate) fn from_index(index: usize) -> Self
    {
        Self(index + 1)
    }

    pub fn number(&self) -> usize
    {
        self.0
    }

    /// Zero based offset, used to index per station vectors.
    pub fn index(&self) -> usize
    {
        self.0 - 1
    }
}

impl fmt::Display for Station
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "S{}", self.0)
    }
}
