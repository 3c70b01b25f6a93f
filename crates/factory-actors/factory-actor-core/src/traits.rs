use anyhow::Result;
use factory_contracts::CycleEvent;
use factory_scheduling_environment::SchedulingEnvironment;

/// The frozen inputs of an algorithm, derived once from the environment.
pub trait Parameters
where
    Self: Sized,
{
    fn from_source(scheduling_environment: &SchedulingEnvironment) -> Result<Self>;
}

/// The state an algorithm mutates while it runs.
pub trait Solution
{
    type Parameters;

    fn new(parameters: &Self::Parameters) -> Self;
}

/// Receives every step of a data collection run in the order it happened.
/// Events are owned values, a receiver may keep them for replay.
pub trait CycleObserver
{
    fn observe(&mut self, cycle_event: CycleEvent);
}

impl<F> CycleObserver for F
where
    F: FnMut(CycleEvent),
{
    fn observe(&mut self, cycle_event: CycleEvent)
    {
        self(cycle_event)
    }
}

/// Append only record of the events of a run.
#[derive(Debug, Clone, Default)]
pub struct CycleLog
{
    cycle_events: Vec<CycleEvent>,
}

impl CycleLog
{
    pub fn cycle_events(&self) -> &[CycleEvent]
    {
        &self.cycle_events
    }

    pub fn into_cycle_events(self) -> Vec<CycleEvent>
    {
        self.cycle_events
    }

    pub fn len(&self) -> usize
    {
        self.cycle_events.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.cycle_events.is_empty()
    }
}

impl CycleObserver for CycleLog
{
    fn observe(&mut self, cycle_event: CycleEvent)
    {
        self.cycle_events.push(cycle_event);
    }
}
