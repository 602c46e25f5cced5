//! Resource definitions for the `metrics.k8s.io` API.
//!
//! The upstream Go types live in `k8s.io/metrics`; `k8s-openapi` does not ship
//! them, so they are declared here together with the trait impls `kube` needs
//! to list them through the aggregated API.

use std::time::Duration;

use k8s_openapi as k8s;
use serde::Deserialize;
use serde::Serialize;

use k8s::apimachinery::pkg::api::resource;
use k8s::apimachinery::pkg::apis::meta::v1 as metav1;

pub use metrics::v1beta1;

pub mod metrics;
