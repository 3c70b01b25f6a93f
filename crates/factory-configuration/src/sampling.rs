use factory_scheduling_environment::generator::SamplingRange;
use factory_scheduling_environment::generator::SamplingRanges;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TomlRange
{
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingToml
{
    pub skill: TomlRange,
    pub fatigue_base: TomlRange,
    pub delivery_time: TomlRange,
    pub fatigue_cost: TomlRange,
}

impl Default for SamplingToml
{
    fn default() -> Self
    {
        let defaults = SamplingRanges::default();
        Self {
            skill: defaults.skill.into(),
            fatigue_base: defaults.fatigue_base.into(),
            delivery_time: defaults.delivery_time.into(),
            fatigue_cost: defaults.fatigue_cost.into(),
        }
    }
}

impl From<SamplingRange> for TomlRange
{
    fn from(value: SamplingRange) -> Self
    {
        Self {
            low: value.low,
            high: value.high,
        }
    }
}

impl From<TomlRange> for SamplingRange
{
    fn from(value: TomlRange) -> Self
    {
        SamplingRange::new(value.low, value.high)
    }
}

impl From<&SamplingToml> for SamplingRanges
{
    fn from(value: &SamplingToml) -> Self
    {
        SamplingRanges {
            skill: value.skill.into(),
            fatigue_base: value.fatigue_base.into(),
            delivery_time: value.delivery_time.into(),
            fatigue_cost: value.fatigue_cost.into(),
        }
    }
}
