//! Renderings of capacity results for stdout.

use std::collections::BTreeMap;
use std::fmt;

use k8s_capacity::ClusterAggregate;
use k8s_capacity::ContainerStat;
use k8s_capacity::Factors;
use k8s_capacity::NamespaceSnapshot;
use k8s_capacity::NodeSelector;
use k8s_capacity::NodeSnapshots;
use k8s_capacity::Quantity;
use k8s_capacity::Scale;
use serde::Serialize;

pub(crate) use cluster::ClusterReport;
pub(crate) use event::CapacityEvent;
pub(crate) use namespace::NamespaceReport;
pub(crate) use namespace::NamespaceText;

mod cluster;
mod event;
mod namespace;

const SECTION: &str = "================";
const RULE: &str = "----------------";

/// Whole cores, with millicore precision.
fn cores(quantity: &Quantity) -> f64 {
    quantity.milli_value() as f64 / 1000.0
}

fn percent(factor: f64) -> f64 {
    factor * 100.0
}
