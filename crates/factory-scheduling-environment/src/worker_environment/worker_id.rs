use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Identity shared by a worker's true profile and its factory profile.
/// Displayed and serialized zero padded to four digits, `0001`.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct WorkerId(u32);

impl WorkerId
{
    pub fn new(number: u32) -> Self
    {
        Self(number)
    }

    pub fn number(&self) -> u32
    {
        self.0
    }
}

impl fmt::Display for WorkerId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for WorkerId
{
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        s.trim().parse::<u32>().map(WorkerId)
    }
}

impl Serialize for WorkerId
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WorkerId
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let worker_id_string = String::deserialize(deserializer)?;
        worker_id_string
            .parse::<WorkerId>()
            .map_err(serde::de::Error::custom)
    }
}

/// Hands out strictly increasing worker ids. Owned by the session instead of
/// living in process wide state, so that every session (and every test) can
/// start counting from one.
#[derive(Debug, Clone)]
pub struct WorkerIdAllocator
{
    next: u32,
}

impl Default for WorkerIdAllocator
{
    fn default() -> Self
    {
        Self { next: 1 }
    }
}

impl WorkerIdAllocator
{
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> WorkerId
    {
        let worker_id = WorkerId(self.next);
        self.next += 1;
        worker_id
    }

    pub fn reset(&mut self)
    {
        self.next = 1;
    }
}
