use std::fmt;
use std::str::FromStr;

use super::*;

/// Node snapshots keyed by node name.
pub type NodeSnapshots = BTreeMap<String, NodeSnapshot>;

/// Which nodes count toward the cluster totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeSelector {
    #[default]
    All,
    Label {
        key: String,
        value: String,
    },
}

impl NodeSelector {
    pub fn label(key: impl ToString, value: impl ToString) -> Self {
        Self::Label {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn matches(&self, node: &corev1::Node) -> bool {
        match self {
            Self::All => true,
            Self::Label { key, value } => node.has_label(key, value),
        }
    }
}

/// `""` selects every node, `KEY=VALUE` selects nodes carrying that label.
impl FromStr for NodeSelector {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Ok(Self::All);
        }
        match text.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self::label(key, value)),
            _ => Err(Error::Selector(text.to_string())),
        }
    }
}

impl fmt::Display for NodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => Ok(()),
            Self::Label { key, value } => write!(f, "{key}={value}"),
        }
    }
}

/// Capacity and consumption of one node.
///
/// Only selected nodes get allocatable capacity, usage and requests filled in;
/// an unselected node keeps its zero values and is skipped by [`aggregate`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub name: String,
    pub selected: bool,
    pub allocatable: Capacity,
    /// Live usage from metrics-server, zero until a sample arrives.
    pub used: Compute,
    pub requests: Compute,
    pub limits: Compute,
    pub used_pods: i64,
}

impl NodeSnapshot {
    pub fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Allocatable minus requests and pod count. Negative when over-committed.
    pub fn available(&self) -> Capacity {
        self.allocatable.headroom(&self.requests, self.used_pods)
    }

    pub fn utilization(&self) -> Factors {
        Factors::utilization(&self.requests, self.used_pods, &self.allocatable)
    }

    /// Count one non-terminal pod scheduled on this node.
    fn add_pod(&mut self, pod: &corev1::Pod) -> Result<(), QuantityParseError> {
        for container in pod.containers() {
            self.requests += Compute::from_resource_list(container.requests())?;
            self.limits += Compute::from_resource_list(container.limits())?;
        }
        self.used_pods += 1;
        Ok(())
    }
}

/// Build one snapshot per node.
///
/// Runs a capacity pass over `nodes` and then a usage pass over `metrics` and
/// `pods`. Metrics for unknown or unselected nodes are dropped, as are
/// terminal pods and pods not yet bound to a selected node.
pub fn collect_nodes(
    nodes: &[corev1::Node],
    selector: &NodeSelector,
    metrics: &[metricsv1::NodeMetrics],
    pods: &[corev1::Pod],
) -> Result<NodeSnapshots, Error> {
    let mut snapshots = NodeSnapshots::new();

    for node in nodes {
        let name = node.metadata.name.as_deref().unwrap_or_default();
        let mut snapshot = NodeSnapshot::new(name);
        snapshot.selected = selector.matches(node);
        if snapshot.selected {
            snapshot.allocatable = Capacity::from_resource_list(node.allocatable())
                .map_err(Error::quantity("node", Some(name)))?;
        }
        snapshots.insert(snapshot.name.clone(), snapshot);
    }

    for sample in metrics {
        let name = sample.metadata.name.as_deref();
        if let Some(snapshot) = selected_mut(&mut snapshots, name) {
            snapshot.used =
                Compute::from_usage(&sample.usage).map_err(Error::quantity("nodemetrics", name))?;
        }
    }

    for pod in pods.iter().filter(|pod| !pod.is_terminal()) {
        if let Some(snapshot) = selected_mut(&mut snapshots, pod.node_name()) {
            snapshot
                .add_pod(pod)
                .map_err(Error::quantity("pod", pod.metadata.name.as_deref()))?;
        }
    }

    tracing::debug!(
        nodes = snapshots.len(),
        selected = snapshots.values().filter(|node| node.selected).count(),
        %selector,
        "collected node snapshots"
    );

    Ok(snapshots)
}

fn selected_mut<'a>(
    snapshots: &'a mut NodeSnapshots,
    name: Option<&str>,
) -> Option<&'a mut NodeSnapshot> {
    snapshots
        .get_mut(name?)
        .filter(|snapshot| snapshot.selected)
}
