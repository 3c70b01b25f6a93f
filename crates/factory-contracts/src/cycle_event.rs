use std::collections::BTreeMap;
use std::fmt;

use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::performance::StationPerformance;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;

use crate::factory_worker_snapshot::FactoryWorkerSnapshot;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CyclePhase
{
    Base,
    Skip,
    Rotation,
    Optimization,
    IncompleteFix,
}

/// Label of a cycle as shown to an operator. The base cycle is `1` and the
/// rotations continue counting from there; the other phases are labelled
/// after the position or the worker and station they concern.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum CycleLabel
{
    Numbered(u64),
    SkipPosition(usize),
    OptimizePosition(usize),
    Fix(WorkerId, Station),
}

impl fmt::Display for CycleLabel
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            CycleLabel::Numbered(cycle) => write!(f, "{}", cycle),
            CycleLabel::SkipPosition(position) => write!(f, "Skip_Pos_{}", position + 1),
            CycleLabel::OptimizePosition(position) => write!(f, "Opt_{}", position + 1),
            CycleLabel::Fix(worker_id, station) => write!(f, "Fix_{}_{}", worker_id, station),
        }
    }
}

/// Percentage observed for the worker that occupied a station during a
/// probe. Isolated gap filling probes have no raw value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PerformanceComparison
{
    pub worker_id: WorkerId,
    pub raw_percentage: Option<f64>,
    pub adjusted_percentage: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct OptimizationDetail
{
    pub old_worker: WorkerId,
    pub new_worker: WorkerId,
    pub score: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum CycleDetails
{
    Base {
        base_performance: StationPerformance,
        performance_comparison: BTreeMap<Station, PerformanceComparison>,
    },
    Skip {
        position: usize,
        message: String,
    },
    Rotation {
        position: usize,
        rotation: usize,
        performance_comparison: BTreeMap<Station, PerformanceComparison>,
    },
    Optimization {
        position: usize,
        optimization_details: BTreeMap<Station, OptimizationDetail>,
    },
    IncompleteFix {
        worker_id: WorkerId,
        station: Station,
        performance_comparison: BTreeMap<Station, PerformanceComparison>,
    },
}

/// One step of the data collection. Skip events carry no learned model
/// snapshot since nothing was learned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CycleEvent
{
    pub cycle: CycleLabel,
    pub assignment: Assignment,
    pub factory_workers: Vec<FactoryWorkerSnapshot>,
    pub details: CycleDetails,
}

impl CycleEvent
{
    pub fn phase(&self) -> CyclePhase
    {
        match self.details {
            CycleDetails::Base { .. } => CyclePhase::Base,
            CycleDetails::Skip { .. } => CyclePhase::Skip,
            CycleDetails::Rotation { .. } => CyclePhase::Rotation,
            CycleDetails::Optimization { .. } => CyclePhase::Optimization,
            CycleDetails::IncompleteFix { .. } => CyclePhase::IncompleteFix,
        }
    }

    pub fn performance_comparison(&self) -> Option<&BTreeMap<Station, PerformanceComparison>>
    {
        match &self.details {
            CycleDetails::Base {
                performance_comparison,
                ..
            }
            | CycleDetails::Rotation {
                performance_comparison,
                ..
            }
            | CycleDetails::IncompleteFix {
                performance_comparison,
                ..
            } => Some(performance_comparison),
            CycleDetails::Skip { .. } | CycleDetails::Optimization { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests
{
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_cycle_labels()
    {
        let station = Station::new(2, 6).unwrap();

        assert_eq!(CycleLabel::Numbered(1).to_string(), "1");
        assert_eq!(CycleLabel::SkipPosition(0).to_string(), "Skip_Pos_1");
        assert_eq!(CycleLabel::OptimizePosition(2).to_string(), "Opt_3");
        assert_eq!(
            CycleLabel::Fix(WorkerId::new(4), station).to_string(),
            "Fix_0004_S2"
        );
    }

    #[test]
    fn test_phase_names_match_the_front_end_tags()
    {
        assert_eq!(CyclePhase::IncompleteFix.to_string(), "incomplete_fix");
        assert_eq!(
            serde_json::to_string(&CyclePhase::Optimization).unwrap(),
            "\"optimization\""
        );
    }

    #[test]
    fn test_phase_display_agrees_with_serialization()
    {
        for cycle_phase in CyclePhase::iter() {
            assert_eq!(
                serde_json::to_string(&cycle_phase).unwrap(),
                format!("\"{}\"", cycle_phase)
            );
        }
    }
}
