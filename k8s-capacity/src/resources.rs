use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Sub;

use super::*;

/// CPU, memory and pod slots offered to workloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub cpu: Quantity,
    pub memory: Quantity,
    pub pods: Quantity,
}

/// A CPU and memory pair: live usage, declared requests or declared limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Compute {
    pub cpu: Quantity,
    pub memory: Quantity,
}

impl Capacity {
    /// What is left after `requests` and `used_pods`. Not clamped at zero.
    pub fn headroom(&self, requests: &Compute, used_pods: i64) -> Self {
        Self {
            cpu: self.cpu - requests.cpu,
            memory: self.memory - requests.memory,
            pods: self.pods - Quantity::from(used_pods),
        }
    }

    pub(crate) fn from_resource_list(
        list: Option<&ResourceList>,
    ) -> Result<Self, QuantityParseError> {
        Ok(Self {
            cpu: quantity(list.cpu())?,
            memory: quantity(list.memory())?,
            pods: quantity(list.pods())?,
        })
    }
}

impl Compute {
    pub(crate) fn from_resource_list(
        list: Option<&ResourceList>,
    ) -> Result<Self, QuantityParseError> {
        Ok(Self {
            cpu: quantity(list.cpu())?,
            memory: quantity(list.memory())?,
        })
    }

    pub(crate) fn from_usage(usage: &metricsv1::Usage) -> Result<Self, QuantityParseError> {
        Ok(Self {
            cpu: Quantity::try_from(&usage.cpu)?,
            memory: Quantity::try_from(&usage.memory)?,
        })
    }
}

/// A missing entry is [`Quantity::ZERO`]; a malformed one is an error.
pub(crate) fn quantity(
    value: Option<&resource::Quantity>,
) -> Result<Quantity, QuantityParseError> {
    value.map_or(Ok(Quantity::ZERO), Quantity::try_from)
}

impl Add for Capacity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            cpu: self.cpu + rhs.cpu,
            memory: self.memory + rhs.memory,
            pods: self.pods + rhs.pods,
        }
    }
}

impl AddAssign for Capacity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Capacity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            cpu: self.cpu - rhs.cpu,
            memory: self.memory - rhs.memory,
            pods: self.pods - rhs.pods,
        }
    }
}

impl Add for Compute {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            cpu: self.cpu + rhs.cpu,
            memory: self.memory + rhs.memory,
        }
    }
}

impl AddAssign for Compute {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Compute {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            cpu: self.cpu - rhs.cpu,
            memory: self.memory - rhs.memory,
        }
    }
}
