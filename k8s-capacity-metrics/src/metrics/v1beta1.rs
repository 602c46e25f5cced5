use constcat::concat;

use super::*;

pub use node::NodeMetrics;
pub use pod::PodMetrics;

pub const METRICS_API_GROUP: &str = "metrics.k8s.io";
pub const METRICS_API_VERSION: &str = "v1beta1";
pub const METRICS_API_GROUP_VERSION: &str = concat!(METRICS_API_GROUP, "/", METRICS_API_VERSION);

mod duration;
mod node;
mod pod;

/// Instantaneous resource usage. CPU is in cores, memory is the working set in bytes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub cpu: resource::Quantity,
    #[serde(default)]
    pub memory: resource::Quantity,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default)]
    pub usage: Usage,
}

impl Usage {
    pub fn new(cpu: impl ToString, memory: impl ToString) -> Self {
        Self {
            cpu: resource::Quantity(cpu.to_string()),
            memory: resource::Quantity(memory.to_string()),
        }
    }
}

impl Container {
    pub fn new(name: impl ToString, usage: Usage) -> Self {
        let name = name.to_string();
        Self { name, usage }
    }
}

#[cfg(test)]
mod tests;
