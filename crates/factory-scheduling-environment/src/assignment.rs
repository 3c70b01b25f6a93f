use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::station::Station;
use crate::worker_environment::worker_id::WorkerId;

/// Station occupancy. The key set is always exactly the stations `[1, S]` and
/// every worker appears in exactly one station exactly once. The offset of a
/// worker inside its station is its position; the workers sharing a position
/// across all stations form the cohort that the collector rotates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Assignment
{
    station_count: usize,
    stations: BTreeMap<Station, Vec<WorkerId>>,
}

impl Assignment
{
    pub fn new(station_count: usize) -> Self
    {
        Self {
            station_count,
            stations: Station::all(station_count)
                .map(|station| (station, Vec::new()))
                .collect(),
        }
    }

    /// Round robin placement in the given order: the i-th worker goes to
    /// station `(i mod S) + 1`.
    pub fn sequential(worker_ids: &[WorkerId], station_count: usize) -> Self
    {
        let mut assignment = Self::new(station_count);
        for worker_id in worker_ids {
            assignment.hire(*worker_id);
        }
        assignment
    }

    /// Appends the worker to the station that continues the round robin
    /// cycle and returns that station.
    pub fn hire(&mut self, worker_id: WorkerId) -> Station
    {
        let worker_count = self.number_of_workers() + 1;
        let station = Station::from_index((worker_count - 1) % self.station_count);

        self.stations.entry(station).or_default().push(worker_id);
        station
    }

    /// Rebuilds the whole assignment without the fired worker. The remaining
    /// workers keep their station ascending, within station order and are
    /// dealt out round robin again; any earlier rearrangement is discarded.
    pub fn fire(&self, worker_id: &WorkerId) -> Self
    {
        let remaining: Vec<WorkerId> = self
            .concatenated()
            .filter(|remaining_id| remaining_id != worker_id)
            .collect();

        Self::sequential(&remaining, self.station_count)
    }

    /// Appends the worker to a given station. Used when an assignment is
    /// built station by station instead of round robin.
    pub fn assign_to_station(&mut self, station: &Station, worker_id: WorkerId)
    {
        debug_assert!(
            self.locate(&worker_id).is_none(),
            "worker {} is already assigned",
            worker_id
        );
        self.stations.entry(*station).or_default().push(worker_id);
    }

    pub fn station_count(&self) -> usize
    {
        self.station_count
    }

    pub fn stations(&self) -> impl Iterator<Item = (&Station, &Vec<WorkerId>)>
    {
        self.stations.iter()
    }

    pub fn workers(&self, station: &Station) -> &[WorkerId]
    {
        self.stations
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every worker, station by station in ascending order.
    pub fn concatenated(&self) -> impl Iterator<Item = WorkerId> + '_
    {
        self.stations.values().flatten().copied()
    }

    pub fn number_of_workers(&self) -> usize
    {
        self.stations.values().map(Vec::len).sum()
    }

    pub fn max_station_length(&self) -> usize
    {
        self.stations.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn worker_at(&self, station: &Station, position: usize) -> Option<WorkerId>
    {
        self.stations.get(station)?.get(position).copied()
    }

    /// Replaces the occupant of an existing position and returns the previous
    /// occupant. Positions that do not exist are left untouched.
    pub fn set_worker_at(
        &mut self,
        station: &Station,
        position: usize,
        worker_id: WorkerId,
    ) -> Option<WorkerId>
    {
        let slot = self.stations.get_mut(station)?.get_mut(position)?;
        Some(std::mem::replace(slot, worker_id))
    }

    /// The workers at `position` of every station that is long enough, in
    /// ascending station order.
    pub fn position_cohort(&self, position: usize) -> Vec<(Station, WorkerId)>
    {
        self.stations
            .iter()
            .filter_map(|(station, worker_ids)| {
                worker_ids
                    .get(position)
                    .map(|worker_id| (*station, *worker_id))
            })
            .collect()
    }

    pub fn locate(&self, worker_id: &WorkerId) -> Option<(Station, usize)>
    {
        self.stations.iter().find_map(|(station, worker_ids)| {
            worker_ids
                .iter()
                .position(|id| id == worker_id)
                .map(|position| (*station, position))
        })
    }

    /// Copy of the assignment in which the worker left its station and was
    /// inserted into `target` at the position index it had before. When the
    /// target station is too short the worker is appended instead.
    pub fn with_worker_moved(&self, worker_id: &WorkerId, target: &Station) -> Self
    {
        let mut moved = self.clone();
        let origin = self.locate(worker_id);

        if let Some((station, position)) = origin {
            if let Some(worker_ids) = moved.stations.get_mut(&station) {
                worker_ids.remove(position);
            }
        }

        let target_workers = moved.stations.entry(*target).or_default();
        match origin {
            Some((_, position)) if position < target_workers.len() => {
                target_workers.insert(position, *worker_id)
            }
            _ => target_workers.push(*worker_id),
        }
        moved
    }
}

impl fmt::Display for Assignment
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for (station, worker_ids) in &self.stations {
            writeln!(f, "{}: [{}]", station, worker_ids.iter().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::*;

    fn ids(count: u32) -> Vec<WorkerId>
    {
        (1..=count).map(WorkerId::new).collect()
    }

    fn station(number: usize) -> Station
    {
        Station::new(number, 6).unwrap()
    }

    #[test]
    fn test_six_workers_get_one_station_each()
    {
        let assignment = Assignment::sequential(&ids(6), 6);

        for (offset, (_, worker_ids)) in assignment.stations().enumerate() {
            assert_eq!(worker_ids, &vec![WorkerId::new(offset as u32 + 1)]);
        }
    }

    #[test]
    fn test_hire_continues_round_robin()
    {
        let mut assignment = Assignment::sequential(&ids(7), 6);

        let hired_station = assignment.hire(WorkerId::new(8));

        assert_eq!(hired_station, station(2));
        assert_eq!(
            assignment.workers(&station(2)),
            &[WorkerId::new(2), WorkerId::new(8)]
        );
    }

    #[test]
    fn test_fire_discards_rearrangements()
    {
        let mut assignment = Assignment::sequential(&ids(8), 6);
        assignment.set_worker_at(&station(1), 0, WorkerId::new(2));
        assignment.set_worker_at(&station(2), 0, WorkerId::new(1));

        let fired = assignment.fire(&WorkerId::new(5));

        // Concatenated before the fire: [2, 7, 1, 8, 3, 4, 5, 6].
        assert_eq!(fired.workers(&station(1)), &[WorkerId::new(2), WorkerId::new(6)]);
        assert_eq!(fired.workers(&station(2)), &[WorkerId::new(7)]);
        assert_eq!(fired.workers(&station(3)), &[WorkerId::new(1)]);
        assert_eq!(fired.workers(&station(4)), &[WorkerId::new(8)]);
        assert_eq!(fired.workers(&station(5)), &[WorkerId::new(3)]);
        assert_eq!(fired.workers(&station(6)), &[WorkerId::new(4)]);
        assert_eq!(fired.number_of_workers(), 7);
    }

    #[test]
    fn test_position_cohort_skips_short_stations()
    {
        let assignment = Assignment::sequential(&ids(8), 6);

        assert_eq!(
            assignment.position_cohort(1),
            vec![(station(1), WorkerId::new(7)), (station(2), WorkerId::new(8))]
        );
        assert_eq!(assignment.max_station_length(), 2);
        assert!(assignment.position_cohort(2).is_empty());
    }

    #[test]
    fn test_worker_moved_keeps_position_or_appends()
    {
        let assignment = Assignment::sequential(&ids(9), 6);

        let moved = assignment.with_worker_moved(&WorkerId::new(7), &station(2));
        assert_eq!(
            moved.workers(&station(2)),
            &[WorkerId::new(2), WorkerId::new(7), WorkerId::new(8)]
        );
        assert_eq!(moved.workers(&station(1)), &[WorkerId::new(1)]);

        let appended = assignment.with_worker_moved(&WorkerId::new(7), &station(5));
        assert_eq!(appended.workers(&station(5)), &[WorkerId::new(5), WorkerId::new(7)]);

        // The original is a value and stays untouched.
        assert_eq!(assignment.locate(&WorkerId::new(7)), Some((station(1), 1)));
    }

    proptest! {
        #[test]
        fn test_sequential_is_balanced_and_ordered(count in 0u32..60, station_count in 1usize..10) {
            let worker_ids = ids(count);
            let assignment = Assignment::sequential(&worker_ids, station_count);

            let lengths: Vec<usize> = assignment.stations().map(|(_, w)| w.len()).collect();
            let max = lengths.iter().max().copied().unwrap_or(0);
            let min = lengths.iter().min().copied().unwrap_or(0);
            prop_assert!(max - min <= 1);
            prop_assert_eq!(assignment.number_of_workers(), worker_ids.len());

            // Dealing round robin means that reading position by position
            // reproduces the hire order.
            let by_position: Vec<WorkerId> = (0..assignment.max_station_length())
                .flat_map(|position| assignment.position_cohort(position))
                .map(|(_, worker_id)| worker_id)
                .collect();
            prop_assert_eq!(by_position, worker_ids);
        }

        #[test]
        fn test_fire_preserves_relative_order(count in 1u32..40, fired in 1u32..40) {
            let fired = WorkerId::new(fired.min(count));
            let mut assignment = Assignment::sequential(&ids(count), 6);
            // Disturb the structure the way an optimization round would.
            if count >= 2 {
                assignment.set_worker_at(&station(1), 0, WorkerId::new(2));
                assignment.set_worker_at(&station(2), 0, WorkerId::new(1));
            }
            let before: Vec<WorkerId> = assignment
                .concatenated()
                .filter(|worker_id| *worker_id != fired)
                .collect();

            let after = assignment.fire(&fired);

            prop_assert_eq!(after.number_of_workers(), count as usize - 1);
            prop_assert_eq!(after.locate(&fired), None);
            prop_assert_eq!(after, Assignment::sequential(&before, 6));
        }
    }
}
