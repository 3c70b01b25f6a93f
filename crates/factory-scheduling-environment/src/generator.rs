//! Ground truth sampling: true worker profiles on hire and the task profiles
//! of a session.

use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::FactoryLayout;
use crate::error::SchedulingEnvironmentError;
use crate::task_environment::TaskEnvironment;
use crate::task_environment::TaskProfile;
use crate::worker_environment::true_worker::TrueWorkerProfile;
use crate::worker_environment::worker_id::WorkerIdAllocator;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SamplingRange
{
    pub low: f64,
    pub high: f64,
}

impl SamplingRange
{
    pub fn new(low: f64, high: f64) -> Self
    {
        Self { low, high }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64
    {
        rng.random_range(self.low..=self.high)
    }

    fn validate(&self, name: &'static str) -> Result<(), SchedulingEnvironmentError>
    {
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(SchedulingEnvironmentError::InvalidSamplingRange {
                name,
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SamplingRanges
{
    pub skill: SamplingRange,
    pub fatigue_base: SamplingRange,
    pub delivery_time: SamplingRange,
    pub fatigue_cost: SamplingRange,
}

impl Default for SamplingRanges
{
    fn default() -> Self
    {
        Self {
            skill: SamplingRange::new(1.0, 10.0),
            fatigue_base: SamplingRange::new(1.0, 10.0),
            delivery_time: SamplingRange::new(2.0, 5.0),
            fatigue_cost: SamplingRange::new(1.0, 10.0),
        }
    }
}

impl SamplingRanges
{
    /// The performance formula divides by the delivery time and by
    /// `fatigue_base + 5`, so both have to stay positive.
    pub fn validate(&self) -> Result<(), SchedulingEnvironmentError>
    {
        self.skill.validate("skill")?;
        self.fatigue_base.validate("fatigue_base")?;
        self.delivery_time.validate("delivery_time")?;
        self.fatigue_cost.validate("fatigue_cost")?;

        if self.delivery_time.low <= 0.0 {
            return Err(SchedulingEnvironmentError::InvalidSamplingRange {
                name: "delivery_time",
                low: self.delivery_time.low,
                high: self.delivery_time.high,
            });
        }
        if self.fatigue_base.low <= -5.0 {
            return Err(SchedulingEnvironmentError::InvalidSamplingRange {
                name: "fatigue_base",
                low: self.fatigue_base.low,
                high: self.fatigue_base.high,
            });
        }
        Ok(())
    }
}

pub fn generate_true_worker<R: Rng + ?Sized>(
    allocator: &mut WorkerIdAllocator,
    rng: &mut R,
    sampling_ranges: &SamplingRanges,
    factory_layout: &FactoryLayout,
) -> TrueWorkerProfile
{
    let worker_id = allocator.next();

    let skills = factory_layout
        .stations()
        .map(|_| sampling_ranges.skill.sample(&mut *rng))
        .collect();

    TrueWorkerProfile::new(worker_id, skills, sampling_ranges.fatigue_base.sample(&mut *rng))
}

pub fn generate_task_profiles<R: Rng + ?Sized>(
    rng: &mut R,
    sampling_ranges: &SamplingRanges,
    factory_layout: &FactoryLayout,
) -> TaskEnvironment
{
    TaskEnvironment::new(
        factory_layout
            .stations()
            .map(|station| {
                TaskProfile::new(
                    station,
                    sampling_ranges.delivery_time.sample(&mut *rng),
                    sampling_ranges.fatigue_cost.sample(&mut *rng),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests
{
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_generated_values_respect_ranges()
    {
        let mut rng = StdRng::seed_from_u64(7);
        let mut allocator = WorkerIdAllocator::default();
        let ranges = SamplingRanges::default();
        let layout = FactoryLayout::default();

        for _ in 0..50 {
            let true_worker = generate_true_worker(&mut allocator, &mut rng, &ranges, &layout);
            assert_eq!(true_worker.skills.len(), layout.station_count);
            assert!(true_worker.skills.iter().all(|skill| (1.0..=10.0).contains(skill)));
            assert!((1.0..=10.0).contains(&true_worker.fatigue_base));
        }

        let tasks = generate_task_profiles(&mut rng, &ranges, &layout);
        assert_eq!(tasks.len(), layout.station_count);
        for task in tasks.iter() {
            assert!((2.0..=5.0).contains(&task.delivery_time));
            assert!((1.0..=10.0).contains(&task.fatigue_cost));
        }
    }

    #[test]
    fn test_ids_follow_the_allocator()
    {
        let mut rng = StdRng::seed_from_u64(1);
        let mut allocator = WorkerIdAllocator::default();
        let ranges = SamplingRanges::default();
        let layout = FactoryLayout::default();

        let ids: Vec<String> = (0..3)
            .map(|_| {
                generate_true_worker(&mut allocator, &mut rng, &ranges, &layout)
                    .worker_id
                    .to_string()
            })
            .collect();

        assert_eq!(ids, vec!["0001", "0002", "0003"]);
    }

    #[test]
    fn test_non_positive_delivery_time_is_rejected()
    {
        let ranges = SamplingRanges {
            delivery_time: SamplingRange::new(0.0, 5.0),
            ..SamplingRanges::default()
        };

        assert!(ranges.validate().is_err());
        assert!(SamplingRanges::default().validate().is_ok());
    }
}
