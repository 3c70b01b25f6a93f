//! Data handed from the scheduling core to whatever presents it. Everything
//! in here is an owned value: a retained event never changes when later
//! rounds mutate the working structures.

pub mod assignment_report;
pub mod cycle_event;
pub mod factory_worker_snapshot;

pub use assignment_report::AssignmentReport;
pub use assignment_report::StationDetail;
pub use assignment_report::WorkerEfficiency;
pub use cycle_event::CycleDetails;
pub use cycle_event::CycleEvent;
pub use cycle_event::CycleLabel;
pub use cycle_event::CyclePhase;
pub use cycle_event::OptimizationDetail;
pub use cycle_event::PerformanceComparison;
pub use factory_worker_snapshot::FactoryWorkerSnapshot;
