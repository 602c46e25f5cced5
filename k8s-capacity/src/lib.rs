//! Capacity accounting for a Kubernetes cluster.
//!
//! Collectors turn API objects into per-node, per-quota and per-namespace
//! snapshots; [`aggregate`] folds node and quota snapshots into one
//! [`ClusterAggregate`] with totals, the N-minus-one baseline and the derived
//! utilization and subscription ratios.

use std::collections::BTreeMap;

use k8s_capacity_ext as k8s;
use serde::Serialize;

use k8s::corev1;
use k8s::metricsv1;
use k8s::resource;
use k8s::ContainerExt as _;
use k8s::NodeExt as _;
use k8s::PodExt as _;
use k8s::ResourceList;
use k8s::ResourceListExt as _;
use k8s::ResourceQuotaExt as _;

pub use aggregate::aggregate;
pub use aggregate::ClusterAggregate;
pub use aggregate::Factors;
pub use error::Error;
pub use namespace::collect_namespace;
pub use namespace::ContainerStat;
pub use namespace::NamespaceSnapshot;
pub use namespace::PodStat;
pub use node::collect_nodes;
pub use node::NodeSelector;
pub use node::NodeSnapshot;
pub use node::NodeSnapshots;
pub use quantity::Quantity;
pub use quantity::QuantityParseError;
pub use quantity::Scale;
pub use quota::collect_quotas;
pub use quota::QuotaSnapshot;
pub use resources::Capacity;
pub use resources::Compute;

mod aggregate;
mod error;
mod namespace;
mod node;
mod quantity;
mod quota;
mod resources;

#[cfg(test)]
mod fixtures;
